//! # Infisical module
//!
//! The object the workflow host instantiates and calls into. Construction
//! takes the API URL; `with_universal_auth` turns it into a session which
//! exposes the read functions. Results come back wrapped in
//! [`SecretString`] so the host pipeline treats them as sensitive values, or
//! as the raw API records for callers that need the metadata.
//!
//! ```rust,ignore
//! use infisical_secrets::module::Infisical;
//! use infisical_secrets::secrets::{GetSecretRequest, SecretReference};
//!
//! let client_id: SecretReference = "env:INFISICAL_CLIENT_ID".parse()?;
//! let client_secret: SecretReference = "env:INFISICAL_CLIENT_SECRET".parse()?;
//!
//! let session = Infisical::new()?.with_universal_auth(&client_id, &client_secret).await?;
//! let value = session
//!     .get_secret_by_name(GetSecretRequest::new("TEST", project_id, "dev", "/"))
//!     .await?;
//!
//! // hand the wrapped value on; the plaintext only leaves on request
//! container_env.insert("TEST", value);
//! ```

pub mod functions;

pub use functions::{
    find_function, FunctionDoc, ParameterDoc, ParameterKind, API_URL, FUNCTIONS, MODULE_SUMMARY,
};

use tracing::{debug, info};

use crate::config::InfisicalConfig;
use crate::secrets::{
    AuthenticatedClient, ClientConfig, GetSecretRequest, InfisicalClient, ListSecretsRequest,
    ListSecretsResponse, ResolvedSecret, Result, SecretRecord, SecretSource, SecretString,
};

/// The unauthenticated module object.
#[derive(Debug, Clone)]
pub struct Infisical {
    client: InfisicalClient,
}

impl Infisical {
    /// Module pointed at the public Infisical instance.
    pub fn new() -> Result<Self> {
        Self::with_client_config(&ClientConfig::default())
    }

    /// Module pointed at a self-hosted instance.
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self> {
        Self::with_client_config(&ClientConfig { base_url: api_url.into(), ..ClientConfig::default() })
    }

    pub fn from_config(config: &InfisicalConfig) -> Result<Self> {
        Self::with_client_config(&config.client_config())
    }

    pub fn with_client_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self { client: InfisicalClient::new(config)? })
    }

    pub fn api_url(&self) -> &str {
        self.client.base_url().as_str()
    }

    /// Authenticate with Universal Auth.
    ///
    /// Both credentials are unwrapped first, then a single login call is made.
    /// Any failure is returned as-is and no session is produced.
    pub async fn with_universal_auth<I, S>(
        self,
        client_id: &I,
        client_secret: &S,
    ) -> Result<InfisicalSession>
    where
        I: SecretSource + ?Sized,
        S: SecretSource + ?Sized,
    {
        let client_id = client_id.plaintext().await?;
        let client_secret = client_secret.plaintext().await?;

        let client = self.client.universal_auth_login(&client_id, &client_secret).await?;
        Ok(InfisicalSession { client })
    }
}

/// An authenticated module object.
#[derive(Debug, Clone)]
pub struct InfisicalSession {
    client: AuthenticatedClient,
}

impl InfisicalSession {
    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    /// Get a secret by name, wrapped for the host.
    ///
    /// An absent value comes back as an empty secret.
    pub async fn get_secret_by_name(&self, request: GetSecretRequest) -> Result<SecretString> {
        let record = self.get_secret_record(request).await?;
        debug!(secret_name = %record.secret_key, version = ?record.version, "fetched secret");
        Ok(record.secret_value.unwrap_or_default())
    }

    /// Get a secret by name as the raw API record.
    pub async fn get_secret_record(&self, request: GetSecretRequest) -> Result<SecretRecord> {
        self.client.get_secret_by_name(&request).await
    }

    /// List secrets with imports resolved, each value wrapped for the host.
    pub async fn get_secrets(&self, request: ListSecretsRequest) -> Result<Vec<ResolvedSecret>> {
        let listing = self.list_secrets(request).await?;
        let resolved = listing.resolve();
        info!(
            local = listing.secrets.len(),
            imports = listing.imports.len(),
            resolved = resolved.len(),
            "resolved secrets"
        );
        Ok(resolved)
    }

    /// List secrets as the raw API response, imports unresolved.
    pub async fn list_secrets(&self, request: ListSecretsRequest) -> Result<ListSecretsResponse> {
        self.client.list_secrets(&request).await
    }
}
