use cassandra::application::MarketDataFetcher;
use cassandra::domain::errors::QuoteError;
use cassandra::domain::ports::QuoteProvider;
use cassandra::infrastructure::YahooQuoteProvider;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const VIX_BODY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"^VIX"},"indicators":{"quote":[{"close":[18.2,null,21.75,null]}]}}],"error":null}"#;
const NOT_FOUND_BODY: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

/// Serves canned chart responses: `%5EVIX` succeeds, `BROKEN` returns 500,
/// anything else is a Yahoo "Not Found" error body.
async fn spawn_chart_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("")
                    .to_string();

                let (status, body) = if path.contains("/chart/%5EVIX?") || path.contains("/chart/^VIX?") {
                    ("200 OK", VIX_BODY)
                } else if path.contains("/chart/BROKEN?") {
                    ("500 Internal Server Error", "oops")
                } else {
                    ("404 Not Found", NOT_FOUND_BODY)
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_latest_close_skips_trailing_nulls() {
    let base = spawn_chart_server().await;
    let provider = YahooQuoteProvider::new(base, 5, 0);

    let close = provider.latest_close("^VIX").await.unwrap();
    assert_eq!(close, 21.75);
}

#[tokio::test]
async fn test_server_error_is_status() {
    let base = spawn_chart_server().await;
    let provider = YahooQuoteProvider::new(base, 5, 0);

    let err = provider.latest_close("BROKEN").await.unwrap_err();
    assert!(matches!(err, QuoteError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_invalid_ticker_yields_zero_others_unaffected() {
    let base = spawn_chart_server().await;
    let fetcher = MarketDataFetcher::new(Arc::new(YahooQuoteProvider::new(base, 5, 0)));

    let report = fetcher
        .fetch_latest(&[
            ("VIX".to_string(), "^VIX".to_string()),
            ("DXY".to_string(), "NOT-A-TICKER".to_string()),
        ])
        .await;

    assert_eq!(
        report.values(),
        vec![("VIX".to_string(), 21.75), ("DXY".to_string(), 0.0)]
    );
    assert_eq!(report.failed_count(), 1);
}
