use thiserror::Error;

/// Errors related to loading and invoking the crash model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to load model artifact {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("Model artifact is corrupt: {reason}")]
    Corrupt { reason: String },

    #[error("Feature vector shape mismatch: model expects {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Feature order mismatch at position {position}: expected {expected}, got {actual}")]
    FeatureOrder {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("Prediction failed: {reason}")]
    Prediction { reason: String },

    #[error("Model returned a non-finite probability: {value}")]
    InvalidOutput { value: f64 },
}

/// Errors related to the external quote source
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Request for {symbol} failed: {reason}")]
    Request { symbol: String, reason: String },

    #[error("Quote API returned status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("Quote API error for {symbol}: {code} - {description}")]
    Api {
        symbol: String,
        code: String,
        description: String,
    },

    #[error("No closing price available for {symbol}")]
    NoData { symbol: String },
}

/// Errors related to user-supplied indicator values
#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("Unknown indicator: {name}")]
    Unknown { name: String },

    #[error("Invalid value for {name}: {raw}")]
    InvalidValue { name: String, raw: String },

    #[error("Malformed assignment '{raw}', expected NAME=VALUE")]
    MalformedAssignment { raw: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_formatting() {
        let error = ModelError::ShapeMismatch {
            expected: 3,
            actual: 2,
        };

        let msg = error.to_string();
        assert!(msg.contains("expects 3"));
        assert!(msg.contains("got 2"));
    }

    #[test]
    fn test_quote_error_formatting() {
        let error = QuoteError::Status {
            symbol: "^VIX".to_string(),
            status: 404,
        };

        let msg = error.to_string();
        assert!(msg.contains("^VIX"));
        assert!(msg.contains("404"));
    }
}
