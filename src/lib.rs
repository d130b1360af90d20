//! # infisical-secrets
//!
//! A secrets module for workflow hosts backed by [Infisical](https://infisical.com).
//! It authenticates a machine identity with Universal Auth and reads secrets,
//! handing every value back wrapped so that it never shows up in logs or
//! intermediate output.
//!
//! ## Architecture
//!
//! ```text
//! host / CLI → module (Infisical → InfisicalSession) → secrets client → Infisical REST API
//!                      ↓                                     ↓
//!               function catalogue                   import resolution
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use infisical_secrets::{GetSecretRequest, Infisical, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = Infisical::new()?
//!         .with_universal_auth("machine-identity-id", "machine-identity-secret")
//!         .await?;
//!
//!     let value = session
//!         .get_secret_by_name(GetSecretRequest::new("DATABASE_URL", "project-id", "dev", "/"))
//!         .await?;
//!     println!("fetched {} bytes", value.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod module;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::InfisicalConfig;
pub use errors::Error;
pub use module::{Infisical, InfisicalSession};
pub use secrets::{
    GetSecretRequest, ListSecretsRequest, ResolvedSecret, Result, SecretReference, SecretSource,
    SecretString, SecretsError,
};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
