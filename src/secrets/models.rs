//! Wire types for the Infisical REST API.
//!
//! Field names follow the service's camelCase JSON. Secret values deserialize
//! straight into [`SecretString`] so they are redacted from the moment they
//! leave the HTTP body.

use serde::{Deserialize, Serialize};

use super::types::SecretString;

/// Body of `POST /api/v1/auth/universal-auth/login`.
///
/// Borrowed and short-lived: this is the one place credentials are written out
/// in plaintext.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UniversalAuthLogin<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Successful Universal Auth login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: SecretString,

    /// Seconds until the token expires.
    pub expires_in: u64,

    #[serde(rename = "accessTokenMaxTTL", default)]
    pub access_token_max_ttl: u64,

    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Tag attached to a secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecretTag {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A single secret as returned by the raw v3 endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretRecord {
    #[serde(default)]
    pub id: Option<String>,

    pub secret_key: String,

    /// `None` when the service omits the value or sends `null`.
    #[serde(default)]
    pub secret_value: Option<SecretString>,

    #[serde(default)]
    pub secret_comment: Option<String>,

    #[serde(default)]
    pub secret_path: Option<String>,

    /// Project (workspace) id.
    #[serde(default)]
    pub workspace: Option<String>,

    #[serde(default)]
    pub environment: Option<String>,

    #[serde(default)]
    pub version: Option<u64>,

    #[serde(rename = "type", default)]
    pub secret_type: Option<String>,

    #[serde(default)]
    pub tags: Vec<SecretTag>,
}

/// Response of `GET /api/v3/secrets/raw/{secretName}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetSecretResponse {
    pub secret: SecretRecord,
}

/// A secret set pulled in through a secret import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportedSecrets {
    pub secret_path: String,
    pub environment: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub secrets: Vec<SecretRecord>,
}

/// Response of `GET /api/v3/secrets/raw`.
///
/// `imports` is in the service's order: the first entry has the lowest
/// precedence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ListSecretsResponse {
    pub secrets: Vec<SecretRecord>,
    #[serde(default)]
    pub imports: Vec<ImportedSecrets>,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
