//! Configuration file handling for the CLI
//!
//! Loads defaults from ~/.infisical-secrets/config.toml and resolves the
//! connection settings and credentials from flags, that file and the
//! environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::InfisicalConfig;
use crate::secrets::{SecretReference, SecretString};

pub const ENV_CLIENT_ID: &str = "INFISICAL_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "INFISICAL_CLIENT_SECRET";

/// CLI configuration stored in ~/.infisical-secrets/config.toml
///
/// Credentials are references (`env:NAME`, `file:PATH` or a literal), so
/// the file does not have to hold the secret itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Infisical site URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl CliConfig {
    /// Get the default configuration file path (~/.infisical-secrets/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Unable to determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".infisical-secrets");
        path.push("config.toml");

        Ok(path)
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load configuration from a specific path; a missing file is an empty config.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Resolve the API URL
///
/// Checks sources in the following priority order:
/// 1. --api-url command line flag
/// 2. ~/.infisical-secrets/config.toml
/// 3. INFISICAL_API_URL environment variable, else the public instance
pub fn resolve_api_url(flag: Option<String>, file: &CliConfig, env: &InfisicalConfig) -> String {
    if let Some(url) = flag.filter(|u| !u.is_empty()) {
        debug!("Using API URL from --api-url flag: {}", url);
        return url;
    }

    if let Some(url) = file.api_url.as_ref().filter(|u| !u.is_empty()) {
        debug!("Using API URL from config file: {}", url);
        return url.clone();
    }

    debug!("Using API URL from environment: {}", env.api_url);
    env.api_url.clone()
}

/// Resolve the timeout
///
/// Checks sources in the following priority order:
/// 1. --timeout command line flag
/// 2. ~/.infisical-secrets/config.toml
/// 3. INFISICAL_TIMEOUT_SECONDS environment variable, else 30 seconds
pub fn resolve_timeout(flag: Option<u64>, file: &CliConfig, env: &InfisicalConfig) -> u64 {
    if let Some(timeout) = flag {
        debug!("Using timeout from --timeout flag: {} seconds", timeout);
        return timeout;
    }

    if let Some(timeout) = file.timeout {
        debug!("Using timeout from config file: {} seconds", timeout);
        return timeout;
    }

    env.timeout_seconds
}

/// Resolve one Universal Auth credential
///
/// Checks sources in the following priority order:
/// 1. command line flag (a reference)
/// 2. ~/.infisical-secrets/config.toml (a reference)
/// 3. the `env_var` environment variable (the value itself)
pub fn resolve_credential(
    flag: Option<SecretReference>,
    file_value: Option<&str>,
    env_var: &str,
) -> Result<SecretReference> {
    if let Some(reference) = flag {
        debug!(source = ?reference, "Using {} from command line flag", env_var);
        return Ok(reference);
    }

    if let Some(raw) = file_value.filter(|v| !v.is_empty()) {
        let reference = parse_reference(raw);
        debug!(source = ?reference, "Using {} from config file", env_var);
        return Ok(reference);
    }

    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            debug!("Using {} from environment", env_var);
            return Ok(SecretReference::Literal(SecretString::new(value)));
        }
    }

    anyhow::bail!(
        "No value found for {}. Please provide it via:\n\
         - the command line flag (env:NAME, file:PATH or the value)\n\
         - ~/.infisical-secrets/config.toml\n\
         - {} environment variable",
        env_var,
        env_var
    )
}

fn parse_reference(raw: &str) -> SecretReference {
    match raw.parse() {
        Ok(reference) => reference,
        Err(never) => match never {},
    }
}
