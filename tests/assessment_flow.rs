use cassandra::application::{DashboardSession, MarketAnalyzer, MarketDataFetcher};
use cassandra::domain::errors::ModelError;
use cassandra::domain::indicators::{FeatureVector, IndicatorValues, ValueSource};
use cassandra::domain::ports::CrashModel;
use cassandra::domain::risk::{RiskColor, RiskTier};
use cassandra::infrastructure::load_model;
use cassandra::infrastructure::mock::{FixedModel, MockQuoteProvider};
use std::path::PathBuf;
use std::sync::Arc;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

fn symbol_map() -> Vec<(String, String)> {
    [("VIX", "^VIX"), ("JPY", "JPY=X"), ("USGG30YR", "^TYX")]
        .iter()
        .map(|(n, s)| (n.to_string(), s.to_string()))
        .collect()
}

#[tokio::test]
async fn test_fetch_then_analyze_medium_risk() -> anyhow::Result<()> {
    init_logging();

    let provider = MockQuoteProvider::new();
    provider.set_price("^VIX", 24.1).await;
    provider.set_price("^TYX", 4.81).await;
    // JPY=X has no price: that fetch fails

    let model = FixedModel::new(&["VIX", "JPY", "USGG30YR"], 0.45);
    let analyzer = MarketAnalyzer::new(Arc::new(model));
    let fetcher = MarketDataFetcher::new(Arc::new(provider));

    let mut values = analyzer.default_values();
    let report = fetcher.fetch_latest(&symbol_map()).await;
    assert_eq!(
        report.values(),
        vec![
            ("VIX".to_string(), 24.1),
            ("JPY".to_string(), 0.0),
            ("USGG30YR".to_string(), 4.81)
        ]
    );
    report.apply_to(&mut values);
    assert_eq!(values.degraded(), vec!["JPY"]);

    let assessment = analyzer.analyze(&values)?;
    assert_eq!(assessment.tier, RiskTier::Medium);
    assert_eq!(assessment.color, RiskColor::Yellow);
    assert_eq!(assessment.recommendation, "Consider reducing position size to 50%");
    assert_eq!(assessment.probability_pct(), "45.0%");
    Ok(())
}

#[test]
fn test_model_rejects_wrong_length() {
    let model = FixedModel::new(&["VIX", "JPY", "USGG30YR"], 0.2);
    let values = IndicatorValues::with_defaults(&["VIX", "JPY"]);
    let short = FeatureVector::assemble(&["VIX", "JPY"], &values);

    let err = model.predict_crash_probability(&short).unwrap_err();
    assert!(matches!(
        err,
        ModelError::ShapeMismatch {
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn test_model_rejects_reordered_features() {
    let model = FixedModel::new(&["VIX", "JPY"], 0.2);
    let values = IndicatorValues::with_defaults(&["VIX", "JPY"]);
    let swapped = FeatureVector::assemble(&["JPY", "VIX"], &values);

    let err = model.predict_crash_probability(&swapped).unwrap_err();
    assert!(matches!(err, ModelError::FeatureOrder { position: 0, .. }));
}

#[test]
fn test_bundled_model_moves_with_vix() -> anyhow::Result<()> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/crash_model.json");
    let analyzer = MarketAnalyzer::new(load_model(&path)?);

    let calm = analyzer.analyze(&analyzer.default_values())?;
    assert_eq!(calm.tier, RiskTier::Low);

    let mut stressed = analyzer.default_values();
    stressed.set("VIX", 35.0, ValueSource::Manual)?;
    let stressed = analyzer.analyze(&stressed)?;
    assert!(stressed.probability > calm.probability);
    assert_eq!(stressed.tier, RiskTier::High);
    Ok(())
}

#[test]
fn test_session_lists_every_feature_once_per_section() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/crash_model.json");
    let model = load_model(&path).unwrap();
    let feature_count = model.feature_names().len();
    let session = DashboardSession::new(MarketAnalyzer::new(model), symbol_map());

    let groups = session.groups();
    let shown: std::collections::HashSet<&str> = groups
        .sections()
        .flat_map(|(_, names)| names.iter().map(String::as_str))
        .chain(groups.unassigned().iter().map(String::as_str))
        .collect();
    assert_eq!(shown.len(), feature_count);
    assert_eq!(session.values().len(), feature_count);
}
