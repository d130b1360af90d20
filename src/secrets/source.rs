//! Inputs that resolve to a secret value.
//!
//! Credentials reach the plugin either as plain strings or as values the host
//! has already wrapped. [`SecretSource`] unifies both: anything that can be
//! unwrapped to plaintext on demand. [`SecretReference`] is the host-side
//! wrapper used by the CLI, accepting `env:NAME`, `file:PATH` or a literal.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::{Result, SecretsError};
use super::types::SecretString;

/// A value that can be unwrapped to plaintext.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Resolves the wrapped value.
    ///
    /// # Errors
    ///
    /// [`SecretsError::InvalidParameter`] if the value cannot be read.
    async fn plaintext(&self) -> Result<SecretString>;
}

#[async_trait]
impl SecretSource for str {
    async fn plaintext(&self) -> Result<SecretString> {
        Ok(SecretString::new(self))
    }
}

#[async_trait]
impl SecretSource for String {
    async fn plaintext(&self) -> Result<SecretString> {
        Ok(SecretString::new(self.as_str()))
    }
}

#[async_trait]
impl SecretSource for SecretString {
    async fn plaintext(&self) -> Result<SecretString> {
        Ok(self.clone())
    }
}

/// Where a secret input comes from.
///
/// Parsed from `env:NAME`, `file:PATH`, or taken literally otherwise.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretReference {
    Literal(SecretString),
    Env(String),
    File(PathBuf),
}

impl FromStr for SecretReference {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if let Some(name) = s.strip_prefix("env:") {
            Self::Env(name.to_string())
        } else if let Some(path) = s.strip_prefix("file:") {
            Self::File(PathBuf::from(path))
        } else {
            Self::Literal(SecretString::new(s))
        })
    }
}

impl fmt::Debug for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "Literal({:?})", value),
            Self::Env(name) => write!(f, "Env({})", name),
            Self::File(path) => write!(f, "File({})", path.display()),
        }
    }
}

#[async_trait]
impl SecretSource for SecretReference {
    async fn plaintext(&self) -> Result<SecretString> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Env(name) => std::env::var(name).map(SecretString::new).map_err(|_| {
                SecretsError::invalid_parameter(
                    format!("env:{}", name),
                    "environment variable is not set",
                )
            }),
            Self::File(path) => {
                let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                    SecretsError::invalid_parameter(format!("file:{}", path.display()), e.to_string())
                })?;
                Ok(SecretString::new(contents.trim_end_matches(['\r', '\n'])))
            }
        }
    }
}
