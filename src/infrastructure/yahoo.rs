use crate::domain::errors::QuoteError;
use crate::domain::ports::QuoteProvider;
use crate::infrastructure::http_client_factory::HttpClientFactory;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Latest daily close from the Yahoo Finance chart API
pub struct YahooQuoteProvider {
    client: ClientWithMiddleware,
    base_url: String,
}

impl YahooQuoteProvider {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64, max_retries: u32) -> Self {
        Self {
            client: HttpClientFactory::create_client(timeout_secs, max_retries),
            base_url: base_url.into(),
        }
    }

    /// `{base}/v8/finance/chart/{symbol}?interval=1d&range=1d`, symbol encoded as one segment
    fn chart_url(&self, symbol: &str) -> Result<Url, QuoteError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| QuoteError::Request {
            symbol: symbol.to_string(),
            reason: format!("invalid base url: {}", e),
        })?;
        url.path_segments_mut()
            .map_err(|_| QuoteError::Request {
                symbol: symbol.to_string(),
                reason: "base url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("interval", "1d")
            .append_pair("range", "1d");
        Ok(url)
    }
}

/// Last non-null close in a chart payload
fn last_close(symbol: &str, body: ChartResponse) -> Result<f64, QuoteError> {
    if let Some(error) = body.chart.error {
        return Err(QuoteError::Api {
            symbol: symbol.to_string(),
            code: error.code,
            description: error.description,
        });
    }

    body.chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|data| data.indicators.quote.into_iter().next())
        .and_then(|quote| quote.close.into_iter().rev().flatten().next())
        .filter(|close| close.is_finite())
        .ok_or_else(|| QuoteError::NoData {
            symbol: symbol.to_string(),
        })
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn latest_close(&self, symbol: &str) -> Result<f64, QuoteError> {
        let url = self.chart_url(symbol)?;
        debug!("Fetching quote for {} from {}", symbol, url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| QuoteError::Request {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ChartResponse = response.json().await.map_err(|e| QuoteError::Request {
            symbol: symbol.to_string(),
            reason: format!("Failed to parse chart response: {}", e),
        })?;

        last_close(symbol, body)
    }

    fn name(&self) -> &str {
        "Yahoo Finance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_chart_url_encodes_symbol() {
        let provider = YahooQuoteProvider::new("https://query1.finance.yahoo.com", 5, 0);

        let url = provider.chart_url("^VIX").unwrap();
        assert!(url.path().starts_with("/v8/finance/chart/"));
        assert!(url.path().ends_with("VIX"));
        assert_eq!(url.query(), Some("interval=1d&range=1d"));

        let url = provider.chart_url("a/b").unwrap();
        assert!(url.path().ends_with("/chart/a%2Fb"));

        let url = provider.chart_url("JPY=X").unwrap();
        assert!(url.path().ends_with("/chart/JPY=X"));
    }

    #[test]
    fn test_last_close_skips_trailing_nulls() {
        let body = parse(
            r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[17.1, 17.57, null]}]}}],"error":null}}"#,
        );
        assert_eq!(last_close("^VIX", body).unwrap(), 17.57);
    }

    #[test]
    fn test_api_error_is_reported() {
        let body = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        );
        let err = last_close("BOGUS", body).unwrap_err();
        assert!(matches!(err, QuoteError::Api { .. }));
        assert!(err.to_string().contains("BOGUS"));
    }

    #[test]
    fn test_empty_result_is_no_data() {
        let body = parse(r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[null]}]}}],"error":null}}"#);
        assert!(matches!(
            last_close("ERUS", body),
            Err(QuoteError::NoData { .. })
        ));
    }
}
