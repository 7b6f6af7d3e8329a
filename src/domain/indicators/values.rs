use super::defaults::fallback_value;
use crate::domain::errors::IndicatorError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Where the current value of an indicator came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueSource {
    /// Fallback table (or 0.0)
    Default,
    /// Latest close from the quote source
    Fetched,
    /// Quote fetch failed, value replaced with 0.0
    FetchFailed,
    /// Entered by the user
    Manual,
}

impl ValueSource {
    /// True when the value should not be trusted as live data
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::FetchFailed)
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Fetched => write!(f, "fetched"),
            Self::FetchFailed => write!(f, "fetch failed"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorValue {
    pub value: f64,
    pub source: ValueSource,
}

/// Current value of every indicator the model expects.
///
/// Keyed by name; iteration order follows the model's feature order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndicatorValues {
    order: Vec<String>,
    values: HashMap<String, IndicatorValue>,
}

impl IndicatorValues {
    /// Seed every name from the fallback table
    pub fn with_defaults<S: AsRef<str>>(feature_names: &[S]) -> Self {
        let mut values = HashMap::with_capacity(feature_names.len());
        let mut order = Vec::with_capacity(feature_names.len());
        for name in feature_names.iter().map(AsRef::as_ref) {
            if values
                .insert(
                    name.to_string(),
                    IndicatorValue {
                        value: fallback_value(name),
                        source: ValueSource::Default,
                    },
                )
                .is_none()
            {
                order.push(name.to_string());
            }
        }
        Self { order, values }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<IndicatorValue> {
        self.values.get(name).copied()
    }

    /// Value of `name`, 0.0 if it was never seeded
    pub fn value(&self, name: &str) -> f64 {
        self.values.get(name).map(|v| v.value).unwrap_or(0.0)
    }

    /// Mutable handle for UI widgets editing the value in place
    pub fn value_mut(&mut self, name: &str) -> Option<&mut IndicatorValue> {
        self.values.get_mut(name)
    }

    /// Overwrite a known indicator
    pub fn set(&mut self, name: &str, value: f64, source: ValueSource) -> Result<(), IndicatorError> {
        match self.values.get_mut(name) {
            Some(entry) => {
                *entry = IndicatorValue { value, source };
                Ok(())
            }
            None => Err(IndicatorError::Unknown {
                name: name.to_string(),
            }),
        }
    }

    /// Parse and apply a `NAME=VALUE` assignment as a manual entry
    pub fn apply_assignment(&mut self, raw: &str) -> Result<(), IndicatorError> {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| IndicatorError::MalformedAssignment {
                raw: raw.to_string(),
            })?;
        let name = name.trim();
        let parsed = value
            .trim()
            .parse::<f64>()
            .map_err(|_| IndicatorError::InvalidValue {
                name: name.to_string(),
                raw: value.trim().to_string(),
            })?;
        self.set(name, parsed, ValueSource::Manual)
    }

    /// Reset every indicator to its fallback
    pub fn reset(&mut self) {
        for (name, entry) in self.values.iter_mut() {
            *entry = IndicatorValue {
                value: fallback_value(name),
                source: ValueSource::Default,
            };
        }
    }

    /// (name, value) in model order
    pub fn iter(&self) -> impl Iterator<Item = (&str, IndicatorValue)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), *v)))
    }

    pub fn degraded(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, v)| v.source.is_degraded())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Positional model input, names kept so the model can verify alignment
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build the vector in exactly `feature_names` order.
    /// A name with no entry in `values` contributes 0.0.
    pub fn assemble<S: AsRef<str>>(feature_names: &[S], values: &IndicatorValues) -> Self {
        let names: Vec<String> = feature_names
            .iter()
            .map(|n| n.as_ref().to_string())
            .collect();
        let values = names.iter().map(|n| values.value(n)).collect();
        Self { names, values }
    }

    pub fn from_parts(names: Vec<String>, values: Vec<f64>) -> Self {
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
