//! # Error Handling
//!
//! Crate-level error type. Failures from the Infisical API keep their own
//! taxonomy ([`SecretsError`]) and are carried here unchanged; everything
//! else is a configuration problem.

use crate::secrets::SecretsError;

/// Custom result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret backend errors, passed through unmodified
    #[error(transparent)]
    Secrets(#[from] SecretsError),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// The underlying secrets error, if this is one.
    pub fn as_secrets_error(&self) -> Option<&SecretsError> {
        match self {
            Self::Secrets(err) => Some(err),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let reasons: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();
        messages.sort();

        Self::config(format!("Validation failed: {}", messages.join("; ")))
    }
}
