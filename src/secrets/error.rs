//! Error types for Infisical secret operations.
//!
//! Failures reported by the service are passed through as-is: there is no
//! retry layer, so every variant reaches the caller of the plugin function.

use thiserror::Error;

/// Result type for secrets operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while authenticating, fetching or listing secrets.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Universal Auth login was rejected.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The requested secret does not exist in the given scope.
    #[error("Secret not found: {key}")]
    NotFound { key: String },

    /// The machine identity may not read the requested scope.
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// A function parameter failed validation before any request was sent.
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    /// Any other non-success response from the service.
    #[error("Infisical API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SecretsError {
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed { message: message.into() }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied { message: message.into() }
    }

    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { field: field.into(), reason: reason.into() }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api { status, message: message.into() }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// True for failures the caller should treat as "bad credentials or scope",
    /// as opposed to transport or server faults.
    pub fn is_access_error(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. } | Self::PermissionDenied { .. })
    }
}

impl From<validator::ValidationErrors> for SecretsError {
    /// Reports the first failing field, in field-name order so the message is stable.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let reason = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                (field.to_string(), reason)
            })
            .collect();
        fields.sort();

        match fields.into_iter().next() {
            Some((field, reason)) => Self::invalid_parameter(field, reason),
            None => Self::invalid_parameter("request", "validation failed"),
        }
    }
}
