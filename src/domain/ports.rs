use crate::domain::errors::{ModelError, QuoteError};
use crate::domain::indicators::FeatureVector;
use async_trait::async_trait;

/// Pre-trained crash classifier. Read-only once loaded.
pub trait CrashModel: Send + Sync {
    /// Input columns, in the order the model was trained on
    fn feature_names(&self) -> &[String];

    /// Probability of a market downturn in [0, 1].
    /// Fails if `features` does not line up with `feature_names()`.
    fn predict_crash_probability(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Get model name/type
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "unversioned"
    }
}

/// Source of the most recent closing value for an external ticker
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn latest_close(&self, symbol: &str) -> Result<f64, QuoteError>;

    fn name(&self) -> &str;
}

/// Shared alignment check for model implementations
pub fn check_alignment(expected: &[String], features: &FeatureVector) -> Result<(), ModelError> {
    if features.len() != expected.len() || features.names().len() != expected.len() {
        return Err(ModelError::ShapeMismatch {
            expected: expected.len(),
            actual: features.len(),
        });
    }
    if let Some((position, (want, got))) = expected
        .iter()
        .zip(features.names())
        .enumerate()
        .find(|(_, (want, got))| want != got)
    {
        return Err(ModelError::FeatureOrder {
            position,
            expected: want.clone(),
            actual: got.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alignment_ok() {
        let fv = FeatureVector::from_parts(names(&["VIX", "JPY"]), vec![1.0, 2.0]);
        assert!(check_alignment(&names(&["VIX", "JPY"]), &fv).is_ok());
    }

    #[test]
    fn test_alignment_rejects_short_vector() {
        let fv = FeatureVector::from_parts(names(&["VIX"]), vec![1.0]);
        let err = check_alignment(&names(&["VIX", "JPY"]), &fv).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_alignment_rejects_reordered_vector() {
        let fv = FeatureVector::from_parts(names(&["JPY", "VIX"]), vec![2.0, 1.0]);
        let err = check_alignment(&names(&["VIX", "JPY"]), &fv).unwrap_err();
        assert!(matches!(err, ModelError::FeatureOrder { position: 0, .. }));
    }
}
