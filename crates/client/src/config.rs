//! Client configuration loaded from environment variables.
//!
//! - `NURSERY_API_URL` - Storefront base URL (default: `http://127.0.0.1:3000`)
//! - `NURSERY_DATA_DIR` - Directory for local storage (default: `.nursery`)
//! - `NURSERY_CHECKOUT_DELAY_MS` - Simulated payment delay (default: 2000)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::checkout::DEFAULT_PROCESSING_DELAY;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_DATA_DIR: &str = ".nursery";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the client talks to and keeps its state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub data_dir: PathBuf,
    pub checkout_delay: Duration,
}

impl ClientConfig {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("NURSERY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(api_url.trim()).map_err(|e| {
            ConfigError::InvalidEnvVar("NURSERY_API_URL".to_string(), e.to_string())
        })?;

        let checkout_delay = match get("NURSERY_CHECKOUT_DELAY_MS") {
            Some(ms) => ms.trim().parse::<u64>().map(Duration::from_millis).map_err(|e| {
                ConfigError::InvalidEnvVar("NURSERY_CHECKOUT_DELAY_MS".to_string(), e.to_string())
            })?,
            None => DEFAULT_PROCESSING_DELAY,
        };

        Ok(Self {
            api_url,
            data_dir: get("NURSERY_DATA_DIR").map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            checkout_delay,
        })
    }
}
