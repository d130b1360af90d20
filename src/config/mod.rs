//! # Configuration Management
//!
//! Runtime configuration for the Infisical module, read from the environment
//! (a `.env` file is honoured by the binary).
//!
//! | Variable | Default |
//! |---|---|
//! | `INFISICAL_API_URL` | `https://app.infisical.com` |
//! | `INFISICAL_TIMEOUT_SECONDS` | `30` |
//! | `INFISICAL_LOG_LEVEL` | `info` |
//! | `INFISICAL_LOG_JSON` | `false` |

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::errors::{Error, Result};
use crate::secrets::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

pub const ENV_API_URL: &str = "INFISICAL_API_URL";
pub const ENV_TIMEOUT_SECONDS: &str = "INFISICAL_TIMEOUT_SECONDS";
pub const ENV_LOG_LEVEL: &str = "INFISICAL_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "INFISICAL_LOG_JSON";

/// Module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct InfisicalConfig {
    /// Infisical site URL
    #[validate(custom(function = "validate_api_url"))]
    pub api_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Default log filter when `RUST_LOG` is unset
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Emit JSON log lines instead of plain text
    pub log_json: bool,
}

impl Default for InfisicalConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl InfisicalConfig {
    /// Create configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_url = non_empty_var(ENV_API_URL).unwrap_or(defaults.api_url);

        let timeout_seconds = match non_empty_var(ENV_TIMEOUT_SECONDS) {
            Some(raw) => raw
                .parse()
                .map_err(|e| Error::config(format!("Invalid {}: {}", ENV_TIMEOUT_SECONDS, e)))?,
            None => defaults.timeout_seconds,
        };

        let log_level = non_empty_var(ENV_LOG_LEVEL).unwrap_or(defaults.log_level);

        let log_json = non_empty_var(ENV_LOG_JSON)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.log_json);

        let config = Self { api_url, timeout_seconds, log_level, log_json };
        config.validate_all()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate_all(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// HTTP client settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig { base_url: self.api_url.clone(), timeout: self.timeout_seconds }
    }
}

/// Serializes tests that modify the process environment.
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_api_url(raw: &str) -> std::result::Result<(), ValidationError> {
    match url::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("api_url")
            .with_message("API URL must be an absolute http(s) URL".into())),
    }
}
