use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Serialized model artifact
    pub model_path: PathBuf,
    /// Base URL of the Yahoo Finance chart API
    pub quote_base_url: String,
    pub fetch_timeout_secs: u64,
    /// 0 keeps the one-shot fetch policy
    pub fetch_max_retries: u32,
    /// Dashboard fetches quotes once right after launch
    pub fetch_on_startup: bool,
    pub metrics_enabled: bool,
    /// JSON log lines instead of pretty output (CLI)
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/crash_model.json"),
            quote_base_url: "https://query1.finance.yahoo.com".to_string(),
            fetch_timeout_secs: 10,
            fetch_max_retries: 0,
            fetch_on_startup: false,
            metrics_enabled: true,
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let model_path = env::var("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let quote_base_url = env::var("QUOTE_BASE_URL")
            .unwrap_or(defaults.quote_base_url)
            .trim_end_matches('/')
            .to_string();

        let fetch_timeout_secs = env::var("FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("Failed to parse FETCH_TIMEOUT_SECS")?;

        let fetch_max_retries = env::var("FETCH_MAX_RETRIES")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u32>()
            .context("Failed to parse FETCH_MAX_RETRIES")?;

        let fetch_on_startup = env::var("FETCH_ON_STARTUP")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let metrics_enabled = env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let log_json = env::var("LOG_JSON")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        if fetch_timeout_secs == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECS must be greater than 0");
        }

        Ok(Self {
            model_path,
            quote_base_url,
            fetch_timeout_secs,
            fetch_max_retries,
            fetch_on_startup,
            metrics_enabled,
            log_json,
        })
    }
}
