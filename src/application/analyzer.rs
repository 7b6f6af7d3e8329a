use crate::domain::indicators::{FeatureVector, GroupAssignment, IndicatorValues, classify};
use crate::domain::ports::CrashModel;
use crate::domain::risk::{RiskAssessment, evaluate};
use crate::infrastructure::observability::Metrics;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Runs one assessment: assemble features, predict, classify.
#[derive(Clone)]
pub struct MarketAnalyzer {
    model: Arc<dyn CrashModel>,
    metrics: Option<Metrics>,
}

impl MarketAnalyzer {
    pub fn new(model: Arc<dyn CrashModel>) -> Self {
        Self {
            model,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn feature_names(&self) -> &[String] {
        self.model.feature_names()
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn model_version(&self) -> &str {
        self.model.version()
    }

    /// Group assignment of the model's inputs for display
    pub fn groups(&self) -> GroupAssignment {
        classify(self.model.feature_names())
    }

    /// Value store seeded with fallbacks for every model input
    pub fn default_values(&self) -> IndicatorValues {
        IndicatorValues::with_defaults(self.model.feature_names())
    }

    pub fn analyze(&self, values: &IndicatorValues) -> Result<RiskAssessment> {
        let degraded = values.degraded();
        if !degraded.is_empty() {
            warn!(
                "Analyzing with {} fetch-failed inputs set to 0.0: {}",
                degraded.len(),
                degraded.join(", ")
            );
        }

        let features = FeatureVector::assemble(self.model.feature_names(), values);
        let started = Instant::now();
        let probability = self
            .model
            .predict_crash_probability(&features)
            .with_context(|| format!("Model '{}' failed to predict", self.model.name()))?;
        let elapsed = started.elapsed().as_secs_f64();

        let assessment = evaluate(probability);
        info!(
            "MarketAnalyzer: crash probability {} -> {} ({})",
            assessment.probability_pct(),
            assessment.tier,
            assessment.recommendation
        );

        if let Some(metrics) = &self.metrics {
            metrics.observe_inference(self.model.name(), elapsed);
            metrics.record_assessment(assessment.tier, assessment.probability);
        }

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ModelError;
    use crate::domain::indicators::ValueSource;
    use crate::domain::risk::{RiskColor, RiskTier};
    use crate::infrastructure::mock::{FailingModel, FixedModel};

    #[test]
    fn test_analyze_medium_risk() {
        let model = FixedModel::new(&["VIX", "JPY", "USGG30YR"], 0.45);
        let analyzer = MarketAnalyzer::new(Arc::new(model));
        let assessment = analyzer.analyze(&analyzer.default_values()).unwrap();

        assert_eq!(assessment.tier, RiskTier::Medium);
        assert_eq!(assessment.color, RiskColor::Yellow);
        assert_eq!(
            assessment.recommendation,
            "Consider reducing position size to 50%"
        );
        assert_eq!(assessment.probability_pct(), "45.0%");
    }

    #[test]
    fn test_short_store_still_yields_full_vector() {
        let analyzer = MarketAnalyzer::new(Arc::new(FixedModel::new(&["VIX", "JPY"], 0.1)));
        let values = IndicatorValues::with_defaults(&["VIX"]);
        let assessment = analyzer.analyze(&values).unwrap();
        assert_eq!(assessment.tier, RiskTier::Low);
    }

    #[test]
    fn test_model_error_propagates() {
        let analyzer = MarketAnalyzer::new(Arc::new(FailingModel::new(&["VIX", "JPY"], 0.1)));
        let err = analyzer.analyze(&analyzer.default_values()).unwrap_err();

        assert!(err.to_string().contains("Model 'Failing' failed to predict"));
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::Prediction { .. })
        ));
    }

    #[test]
    fn test_failed_prediction_records_no_metrics() {
        let metrics = Metrics::new().unwrap();
        let analyzer = MarketAnalyzer::new(Arc::new(FailingModel::new(&["VIX"], 0.9)))
            .with_metrics(metrics.clone());

        assert!(analyzer.analyze(&analyzer.default_values()).is_err());
        assert_eq!(metrics.assessments(RiskTier::High), 0);
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Metrics::new().unwrap();
        let analyzer =
            MarketAnalyzer::new(Arc::new(FixedModel::new(&["VIX"], 0.75))).with_metrics(metrics.clone());
        let mut values = analyzer.default_values();
        values.set("VIX", 45.0, ValueSource::Manual).unwrap();

        let assessment = analyzer.analyze(&values).unwrap();
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(metrics.assessments(RiskTier::High), 1);
        assert!((metrics.last_crash_probability.get() - 0.75).abs() < 1e-12);
    }
}
