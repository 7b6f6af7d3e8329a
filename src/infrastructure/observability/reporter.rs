//! Push-based metrics reporter for Cassandra
//!
//! Outputs a metrics snapshot as structured JSON to stdout.
//!
//! **Security**: This system only SENDS data, never accepts requests.

use crate::domain::risk::RiskTier;
use crate::infrastructure::observability::metrics::Metrics;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub assessments: AssessmentSnapshot,
    pub quote_fetches: FetchSnapshot,
    pub last_crash_probability: f64,
}

#[derive(Serialize)]
pub struct AssessmentSnapshot {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

#[derive(Serialize)]
pub struct FetchSnapshot {
    pub ok: u64,
    pub failed: u64,
}

pub struct MetricsReporter {
    metrics: Metrics,
    start_time: Instant,
}

impl MetricsReporter {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Collect current metrics snapshot
    pub fn collect_snapshot(&self) -> MetricsSnapshot {
        let uptime = self.start_time.elapsed().as_secs();
        self.metrics.uptime_seconds.set(uptime as f64);

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            assessments: AssessmentSnapshot {
                low: self.metrics.assessments(RiskTier::Low),
                medium: self.metrics.assessments(RiskTier::Medium),
                high: self.metrics.assessments(RiskTier::High),
            },
            quote_fetches: FetchSnapshot {
                ok: self.metrics.fetches(true),
                failed: self.metrics.fetches(false),
            },
            last_crash_probability: self.metrics.last_crash_probability.get(),
        }
    }

    /// Print one snapshot, prefixed so log shippers can filter it
    pub fn report(&self) {
        let snapshot = self.collect_snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                println!("METRICS_JSON:{}", json);
                info!(
                    "Assessments: {} low / {} medium / {} high | Quote fetches: {} ok, {} failed | Uptime: {}s",
                    snapshot.assessments.low,
                    snapshot.assessments.medium,
                    snapshot.assessments.high,
                    snapshot.quote_fetches.ok,
                    snapshot.quote_fetches.failed,
                    snapshot.uptime_seconds
                );
            }
            Err(e) => warn!("Failed to serialize metrics: {}", e),
        }
    }
}
