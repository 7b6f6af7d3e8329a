use crate::domain::indicators::{IndicatorValues, ValueSource};
use crate::domain::ports::QuoteProvider;
use crate::infrastructure::observability::Metrics;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happened to one indicator during a fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    Fetched { value: f64 },
    Failed { reason: String },
}

impl FetchOutcome {
    /// Value handed to the model: the close, or 0.0 on failure
    pub fn value(&self) -> f64 {
        match self {
            Self::Fetched { value } => *value,
            Self::Failed { .. } => 0.0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchEntry {
    pub name: String,
    pub symbol: String,
    pub outcome: FetchOutcome,
}

/// Result of one fetch pass, in symbol map order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchReport {
    entries: Vec<FetchEntry>,
}

impl FetchReport {
    pub fn new(entries: Vec<FetchEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FetchEntry] {
        &self.entries
    }

    /// name -> value, with 0.0 for every failed symbol
    pub fn values(&self) -> Vec<(String, f64)> {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.outcome.value()))
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FetchEntry> {
        self.entries.iter().filter(|e| e.outcome.is_failed())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn fetched_count(&self) -> usize {
        self.entries.len() - self.failed_count()
    }

    /// Write the report into the value store.
    ///
    /// Names the store does not hold are skipped. Returns how many were applied.
    pub fn apply_to(&self, values: &mut IndicatorValues) -> usize {
        let mut applied = 0;
        for entry in &self.entries {
            if !values.contains(&entry.name) {
                debug!(
                    "Skipping {} ({}): not a model feature",
                    entry.name, entry.symbol
                );
                continue;
            }
            let source = match entry.outcome {
                FetchOutcome::Fetched { .. } => ValueSource::Fetched,
                FetchOutcome::Failed { .. } => ValueSource::FetchFailed,
            };
            if values
                .set(&entry.name, entry.outcome.value(), source)
                .is_ok()
            {
                applied += 1;
            }
        }
        applied
    }
}

/// Pulls the latest close for every mapped indicator
pub struct MarketDataFetcher {
    provider: Arc<dyn QuoteProvider>,
    metrics: Option<Metrics>,
}

impl MarketDataFetcher {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            provider,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fetch each (name, symbol) pair in turn. A failing symbol never
    /// affects the others.
    pub async fn fetch_latest(&self, symbol_map: &[(String, String)]) -> FetchReport {
        info!(
            "MarketDataFetcher: fetching {} symbols from {}",
            symbol_map.len(),
            self.provider.name()
        );

        let mut entries = Vec::with_capacity(symbol_map.len());
        for (name, symbol) in symbol_map {
            let outcome = match self.provider.latest_close(symbol).await {
                Ok(value) => {
                    debug!("{} ({}) = {:.4}", name, symbol, value);
                    FetchOutcome::Fetched { value }
                }
                Err(e) => {
                    warn!("Failed to fetch {} ({}): {}. Using 0.0", name, symbol, e);
                    FetchOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            if let Some(metrics) = &self.metrics {
                metrics.record_fetch(!outcome.is_failed());
            }
            entries.push(FetchEntry {
                name: name.clone(),
                symbol: symbol.clone(),
                outcome,
            });
        }

        let report = FetchReport::new(entries);
        info!(
            "MarketDataFetcher: {} fetched, {} failed",
            report.fetched_count(),
            report.failed_count()
        );
        report
    }
}
