use crate::domain::errors::{ModelError, QuoteError};
use crate::domain::indicators::FeatureVector;
use crate::domain::ports::{check_alignment, CrashModel, QuoteProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory quote source. Symbols without a price fail with `NoData`.
#[derive(Clone, Default)]
pub struct MockQuoteProvider {
    prices: Arc<RwLock<HashMap<String, f64>>>,
    requests: Arc<AtomicUsize>,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_price(&self, symbol: &str, price: f64) {
        self.prices.write().await.insert(symbol.to_string(), price);
    }

    pub async fn remove_price(&self, symbol: &str) {
        self.prices.write().await.remove(symbol);
    }

    /// Number of `latest_close` calls served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn latest_close(&self, symbol: &str) -> Result<f64, QuoteError> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.prices
            .read()
            .await
            .get(symbol)
            .copied()
            .ok_or_else(|| QuoteError::NoData {
                symbol: symbol.to_string(),
            })
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

/// Model returning a fixed probability once the input lines up
pub struct FixedModel {
    feature_names: Vec<String>,
    probability: f64,
}

impl FixedModel {
    pub fn new<S: AsRef<str>>(feature_names: &[S], probability: f64) -> Self {
        Self {
            feature_names: feature_names
                .iter()
                .map(|n| n.as_ref().to_string())
                .collect(),
            probability,
        }
    }
}

impl CrashModel for FixedModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_crash_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        check_alignment(&self.feature_names, features)?;
        Ok(self.probability)
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}

/// Model that can be switched into failing every prediction
pub struct FailingModel {
    inner: FixedModel,
    failing: AtomicBool,
}

impl FailingModel {
    pub fn new<S: AsRef<str>>(feature_names: &[S], probability: f64) -> Self {
        Self {
            inner: FixedModel::new(feature_names, probability),
            failing: AtomicBool::new(true),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }
}

impl CrashModel for FailingModel {
    fn feature_names(&self) -> &[String] {
        self.inner.feature_names()
    }

    fn predict_crash_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(ModelError::Prediction {
                reason: "backend unavailable".to_string(),
            });
        }
        self.inner.predict_crash_probability(features)
    }

    fn name(&self) -> &str {
        "Failing"
    }
}
