//! Model artifact loading.
//!
//! An artifact is a JSON envelope naming the feature columns and carrying
//! one of the supported model bodies:
//!
//! ```json
//! {
//!   "name": "crash-logit",
//!   "version": "2024.11",
//!   "feature_names": ["VIX", "JPY", "USGG30YR"],
//!   "model": { "kind": "logistic", "params": { "coefficients": [..], "intercept": -2.1 } }
//! }
//! ```
//!
//! `random_forest` bodies hold `{ "n_features": N, "forest": {..} }`, where
//! `forest` is a serde-serialized smartcore regressor fitted on N columns.

pub mod forest;
pub mod logistic;

pub use forest::{ForestModel, ForestParams, ForestRegressor};
pub use logistic::{LogisticModel, LogisticParams};

use crate::domain::errors::ModelError;
use crate::domain::ports::CrashModel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub feature_names: Vec<String>,
    pub model: ModelBody,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum ModelBody {
    Logistic(LogisticParams),
    RandomForest(ForestParams),
}

impl ModelArtifact {
    /// Validate the envelope and build the runtime model
    pub fn into_model(self) -> Result<Arc<dyn CrashModel>, ModelError> {
        if self.feature_names.is_empty() {
            return Err(ModelError::Corrupt {
                reason: "artifact declares no features".to_string(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.feature_names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(ModelError::Corrupt {
                reason: format!("duplicate feature name {}", dup),
            });
        }

        let version = self.version.unwrap_or_else(|| "unversioned".to_string());
        let model: Arc<dyn CrashModel> = match self.model {
            ModelBody::Logistic(params) => Arc::new(LogisticModel::new(
                self.name,
                version,
                self.feature_names,
                params,
            )?),
            ModelBody::RandomForest(params) => Arc::new(ForestModel::new(
                self.name,
                version,
                self.feature_names,
                params,
            )?),
        };
        Ok(model)
    }
}

/// Parse an artifact from its JSON text
pub fn parse_model(json: &str) -> Result<Arc<dyn CrashModel>, ModelError> {
    let artifact: ModelArtifact = serde_json::from_str(json).map_err(|e| ModelError::Corrupt {
        reason: e.to_string(),
    })?;
    artifact.into_model()
}

/// Load the model once at startup. Failure is fatal to the session.
pub fn load_model(path: &Path) -> Result<Arc<dyn CrashModel>, ModelError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        error!("Failed to read model file {:?}: {}", path, e);
        ModelError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    let model = parse_model(&json).map_err(|e| {
        error!("Failed to deserialize model {:?}: {}", path, e);
        e
    })?;

    info!(
        "Successfully loaded model '{}' ({}) from {:?} with {} features",
        model.name(),
        model.version(),
        path,
        model.feature_names().len()
    );
    Ok(model)
}
