//! Prometheus metrics definitions for Cassandra
//!
//! All metrics use the `cassandra_` prefix and are read-only.

use crate::domain::risk::RiskTier;
use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the dashboard session
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Assessments produced, by risk tier
    pub assessments_total: CounterVec,
    /// Quote fetches by outcome (ok / failed)
    pub quote_fetches_total: CounterVec,
    /// Model inference latency in seconds
    pub model_inference_seconds: HistogramVec,
    /// Most recent crash probability (0-1)
    pub last_crash_probability: GenericGauge<AtomicF64>,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let assessments_total = CounterVec::new(
            Opts::new("cassandra_assessments_total", "Risk assessments by tier"),
            &["tier"],
        )?;
        registry.register(Box::new(assessments_total.clone()))?;

        let quote_fetches_total = CounterVec::new(
            Opts::new("cassandra_quote_fetches_total", "Quote fetches by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(quote_fetches_total.clone()))?;

        let model_inference_seconds = HistogramVec::new(
            HistogramOpts::new(
                "cassandra_model_inference_seconds",
                "Model inference latency in seconds",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
            &["model"],
        )?;
        registry.register(Box::new(model_inference_seconds.clone()))?;

        let last_crash_probability = Gauge::with_opts(Opts::new(
            "cassandra_last_crash_probability",
            "Most recent crash probability (0-1)",
        ))?;
        registry.register(Box::new(last_crash_probability.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "cassandra_uptime_seconds",
            "Process uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            assessments_total,
            quote_fetches_total,
            model_inference_seconds,
            last_crash_probability,
            uptime_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn record_assessment(&self, tier: RiskTier, probability: f64) {
        self.assessments_total
            .with_label_values(&[tier.label()])
            .inc();
        self.last_crash_probability.set(probability);
    }

    pub fn record_fetch(&self, ok: bool) {
        let outcome = if ok { "ok" } else { "failed" };
        self.quote_fetches_total
            .with_label_values(&[outcome])
            .inc();
    }

    pub fn observe_inference(&self, model: &str, seconds: f64) {
        self.model_inference_seconds
            .with_label_values(&[model])
            .observe(seconds);
    }

    pub fn assessments(&self, tier: RiskTier) -> u64 {
        self.assessments_total
            .with_label_values(&[tier.label()])
            .get() as u64
    }

    pub fn fetches(&self, ok: bool) -> u64 {
        let outcome = if ok { "ok" } else { "failed" };
        self.quote_fetches_total
            .with_label_values(&[outcome])
            .get() as u64
    }
}
