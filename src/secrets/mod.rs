//! Infisical secrets access.
//!
//! Read-only access to an Infisical instance through a Machine Identity:
//!
//! - **universal_auth_login**: trade a client id and secret for an access token
//! - **get_secret_by_name**: fetch one secret from a project/environment/path
//! - **list_secrets**: list a path, optionally recursive and tag-filtered, with its imports
//! - **resolve_imports**: layer imported secret sets beneath the local ones
//!
//! # Example
//!
//! ```rust,ignore
//! use infisical_secrets::secrets::{ClientConfig, InfisicalClient, ListSecretsRequest, SecretString};
//!
//! let client = InfisicalClient::new(&ClientConfig::default())?
//!     .universal_auth_login(&SecretString::new(id), &SecretString::new(secret))
//!     .await?;
//!
//! let listing = client.list_secrets(&ListSecretsRequest::new("proj-1", "prod", "/")).await?;
//! for secret in listing.resolve() {
//!     println!("{} = {}", secret.key, secret.value); // value prints [REDACTED]
//! }
//! ```
//!
//! # Security
//!
//! - Values are wrapped in [`SecretString`] as soon as they are deserialized
//! - Neither credentials nor the access token are ever logged
//! - Nothing is cached or written to disk

pub mod client;
pub mod error;
pub mod imports;
pub mod models;
pub mod request;
pub mod source;
pub mod types;

pub use client::{
    AccessToken, AuthenticatedClient, ClientConfig, InfisicalClient, DEFAULT_API_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use error::{Result, SecretsError};
pub use imports::{resolve_imports, ResolvedSecret};
pub use models::{ImportedSecrets, ListSecretsResponse, SecretRecord, SecretTag};
pub use request::{GetSecretRequest, ListSecretsRequest};
pub use source::{SecretReference, SecretSource};
pub use types::{SecretString, REDACTED};
