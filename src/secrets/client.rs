//! HTTP client for the Infisical REST API.
//!
//! Two-phase construction: an [`InfisicalClient`] knows only the base URL and
//! can do nothing but log in; a successful Universal Auth login turns it into
//! an [`AuthenticatedClient`] which carries the access token and serves the
//! read endpoints. There is no way to hold a half-authenticated client.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, trace, warn};
use url::Url;

use super::error::{Result, SecretsError};
use super::models::{
    AccessTokenResponse, ApiErrorBody, GetSecretResponse, ListSecretsResponse, SecretRecord,
    UniversalAuthLogin,
};
use super::request::{GetSecretRequest, ListSecretsRequest};
use super::types::SecretString;

/// Public multi-tenant Infisical endpoint.
pub const DEFAULT_API_URL: &str = "https://app.infisical.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Infisical instance (self-hosted or the public one)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_string(), timeout: DEFAULT_TIMEOUT_SECS }
    }
}

/// Unauthenticated Infisical client.
#[derive(Debug, Clone)]
pub struct InfisicalClient {
    http: Client,
    base_url: Url,
}

impl InfisicalClient {
    /// Builds a client for the given instance.
    ///
    /// # Errors
    ///
    /// [`SecretsError::Config`] if the base URL is not an absolute http(s) URL.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SecretsError::config_error(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Logs in with a Machine Identity client id and secret.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::InvalidParameter`] if either credential is empty
    /// - [`SecretsError::AuthenticationFailed`] if the service rejects them
    /// - [`SecretsError::Http`] on transport failure
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    pub async fn universal_auth_login(
        self,
        client_id: &SecretString,
        client_secret: &SecretString,
    ) -> Result<AuthenticatedClient> {
        if client_id.is_empty() {
            return Err(SecretsError::invalid_parameter("client_id", "cannot be empty"));
        }
        if client_secret.is_empty() {
            return Err(SecretsError::invalid_parameter("client_secret", "cannot be empty"));
        }

        let url = self.endpoint(&["api", "v1", "auth", "universal-auth", "login"])?;
        debug!(url = %url, "POST universal auth login");

        let body = UniversalAuthLogin {
            client_id: client_id.expose_secret(),
            client_secret: client_secret.expose_secret(),
        };
        let response = self.http.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            warn!(status = status.as_u16(), "universal auth login rejected");
            return Err(if status.is_client_error() {
                SecretsError::authentication_failed(message)
            } else {
                SecretsError::api(status.as_u16(), message)
            });
        }

        let token: AccessTokenResponse = decode(response).await?;
        let access_token = AccessToken::from_response(token);
        info!(expires_at = %access_token.expires_at, "universal auth login succeeded");

        Ok(AuthenticatedClient { inner: self, token: access_token })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SecretsError::config_error(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Access token obtained from Universal Auth.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: SecretString,
    token_type: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn from_response(response: AccessTokenResponse) -> Self {
        let ttl = i64::try_from(response.expires_in).unwrap_or(i64::MAX);
        let expires_at = ChronoDuration::try_seconds(ttl)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { value: response.access_token, token_type: response.token_type, expires_at }
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Client holding a Universal Auth access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    inner: InfisicalClient,
    token: AccessToken,
}

impl AuthenticatedClient {
    pub fn access_token(&self) -> &AccessToken {
        &self.token
    }

    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// URL of the single-secret fetch, query included.
    pub fn get_secret_url(&self, request: &GetSecretRequest) -> Result<Url> {
        let mut url =
            self.inner.endpoint(&["api", "v3", "secrets", "raw", request.secret_name.as_str()])?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url)
    }

    /// URL of the bulk listing, query included.
    pub fn list_secrets_url(&self, request: &ListSecretsRequest) -> Result<Url> {
        let mut url = self.inner.endpoint(&["api", "v3", "secrets", "raw"])?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url)
    }

    /// Fetches one secret by name.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::InvalidParameter`] if the request fails validation
    /// - [`SecretsError::NotFound`] if no such secret exists in the scope
    /// - [`SecretsError::PermissionDenied`] on 401/403
    /// - [`SecretsError::Api`] for any other non-success status
    #[instrument(
        skip_all,
        fields(
            secret_name = %request.secret_name,
            project_id = %request.project_id,
            environment = %request.environment_slug,
            secret_path = %request.secret_path
        )
    )]
    pub async fn get_secret_by_name(&self, request: &GetSecretRequest) -> Result<SecretRecord> {
        request.check()?;
        let url = self.get_secret_url(request)?;
        let response: GetSecretResponse = self.send(url, &request.secret_name).await?;
        Ok(response.secret)
    }

    /// Lists secrets under a path, together with the imported sets.
    ///
    /// Tag filters and the recursive flag go to the service untouched; the
    /// response is not filtered again here.
    #[instrument(
        skip_all,
        fields(
            project_id = %request.project_id,
            environment = %request.environment_slug,
            secret_path = %request.secret_path,
            recursive = request.recursive
        )
    )]
    pub async fn list_secrets(&self, request: &ListSecretsRequest) -> Result<ListSecretsResponse> {
        request.check()?;
        let url = self.list_secrets_url(request)?;
        let response: ListSecretsResponse = self.send(url, &request.secret_path).await?;
        debug!(
            secrets = response.secrets.len(),
            imports = response.imports.len(),
            "listed secrets"
        );
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, url: Url, key: &str) -> Result<T> {
        debug!(path = %url.path(), "GET");
        if self.token.is_expired() {
            warn!(expires_at = %self.token.expires_at, "access token has expired");
        }

        let response = self
            .inner
            .http
            .get(url)
            .bearer_auth(self.token.value.expose_secret())
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "response");

        if !status.is_success() {
            let message = error_message(response).await;
            return Err(match status {
                StatusCode::NOT_FOUND => SecretsError::not_found(key),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SecretsError::permission_denied(message)
                }
                _ => SecretsError::api(status.as_u16(), message),
            });
        }

        decode(response).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| SecretsError::config_error(format!("invalid base URL '{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(SecretsError::config_error(format!(
            "base URL must be an absolute http(s) URL, got '{}'",
            raw
        )));
    }
    Ok(url)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Best-effort message from an error response. Falls back to the raw body.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(_) => return status.to_string(),
    };
    trace!(body = %text, "error response");

    match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(ApiErrorBody { message: Some(message), .. }) => message,
        Ok(ApiErrorBody { error: Some(error), .. }) => error,
        _ if text.trim().is_empty() => status.to_string(),
        _ => text,
    }
}
