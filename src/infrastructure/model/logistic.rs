use crate::domain::errors::ModelError;
use crate::domain::indicators::FeatureVector;
use crate::domain::ports::{check_alignment, CrashModel};
use serde::{Deserialize, Serialize};

/// Serialized body of a logistic-regression artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Binary logistic regression: p = sigmoid(w·x + b)
#[derive(Debug, Clone)]
pub struct LogisticModel {
    name: String,
    version: String,
    feature_names: Vec<String>,
    params: LogisticParams,
}

impl LogisticModel {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        feature_names: Vec<String>,
        params: LogisticParams,
    ) -> Result<Self, ModelError> {
        if params.coefficients.len() != feature_names.len() {
            return Err(ModelError::Corrupt {
                reason: format!(
                    "{} coefficients for {} features",
                    params.coefficients.len(),
                    feature_names.len()
                ),
            });
        }
        if !params.intercept.is_finite() || params.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::Corrupt {
                reason: "non-finite coefficient".to_string(),
            });
        }

        Ok(Self {
            name: name.into(),
            version: version.into(),
            feature_names,
            params,
        })
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl CrashModel for LogisticModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_crash_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        check_alignment(&self.feature_names, features)?;

        let z = self.params.intercept
            + self
                .params
                .coefficients
                .iter()
                .zip(features.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();

        let p = sigmoid(z);
        if !p.is_finite() {
            return Err(ModelError::InvalidOutput { value: p });
        }
        Ok(p)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(coefficients: Vec<f64>, intercept: f64) -> Result<LogisticModel, ModelError> {
        LogisticModel::new(
            "test",
            "v1",
            vec!["VIX".to_string(), "JPY".to_string()],
            LogisticParams {
                coefficients,
                intercept,
            },
        )
    }

    #[test]
    fn test_zero_weights_give_half() {
        let m = model(vec![0.0, 0.0], 0.0).unwrap();
        let fv = FeatureVector::from_parts(m.feature_names().to_vec(), vec![17.0, 100.0]);
        let p = m.predict_crash_probability(&fv).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_positive_weight_raises_probability() {
        let m = model(vec![0.2, 0.0], -4.0).unwrap();
        let calm = FeatureVector::from_parts(m.feature_names().to_vec(), vec![12.0, 100.0]);
        let panic = FeatureVector::from_parts(m.feature_names().to_vec(), vec![45.0, 100.0]);

        let p_calm = m.predict_crash_probability(&calm).unwrap();
        let p_panic = m.predict_crash_probability(&panic).unwrap();
        assert!(p_calm < 0.3);
        assert!(p_panic > 0.6);
    }

    #[test]
    fn test_extreme_inputs_stay_in_unit_interval() {
        let m = model(vec![1.0, 0.0], 0.0).unwrap();
        let fv = FeatureVector::from_parts(m.feature_names().to_vec(), vec![1e6, 0.0]);
        let p = m.predict_crash_probability(&fv).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_coefficient_count_must_match() {
        assert!(matches!(
            model(vec![0.1], 0.0),
            Err(ModelError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let m = model(vec![0.1, 0.1], 0.0).unwrap();
        let fv = FeatureVector::from_parts(vec!["VIX".to_string()], vec![17.0]);
        assert!(matches!(
            m.predict_crash_probability(&fv),
            Err(ModelError::ShapeMismatch { .. })
        ));
    }
}
