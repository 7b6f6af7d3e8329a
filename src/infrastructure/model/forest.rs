use crate::domain::errors::ModelError;
use crate::domain::indicators::FeatureVector;
use crate::domain::ports::{check_alignment, CrashModel};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use serde::{Deserialize, Serialize};

pub type ForestRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Serialized body of a random-forest artifact.
///
/// smartcore does not expose the training width, so it is stored alongside.
#[derive(Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of columns the forest was fitted on
    pub n_features: usize,
    pub forest: ForestRegressor,
}

/// Random forest regressed on 0/1 crash labels; the averaged leaf value
/// is read as the crash probability.
pub struct ForestModel {
    name: String,
    version: String,
    feature_names: Vec<String>,
    forest: ForestRegressor,
}

impl ForestModel {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        feature_names: Vec<String>,
        params: ForestParams,
    ) -> Result<Self, ModelError> {
        if params.n_features != feature_names.len() {
            return Err(ModelError::Corrupt {
                reason: format!(
                    "forest was fitted on {} columns but {} feature names are declared",
                    params.n_features,
                    feature_names.len()
                ),
            });
        }
        Ok(Self {
            name: name.into(),
            version: version.into(),
            feature_names,
            forest: params.forest,
        })
    }
}

impl CrashModel for ForestModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_crash_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        check_alignment(&self.feature_names, features)?;

        let input_matrix = DenseMatrix::from_2d_vec(&vec![features.values().to_vec()]).map_err(
            |e| ModelError::Prediction {
                reason: format!("Matrix creation failed: {}", e),
            },
        )?;

        let predictions = self
            .forest
            .predict(&input_matrix)
            .map_err(|e| ModelError::Prediction {
                reason: e.to_string(),
            })?;

        let raw = predictions.first().copied().ok_or_else(|| ModelError::Prediction {
            reason: "No prediction returned".to_string(),
        })?;
        if !raw.is_finite() {
            return Err(ModelError::InvalidOutput { value: raw });
        }
        Ok(raw.clamp(0.0, 1.0))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }
}
