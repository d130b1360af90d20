//! # Observability
//!
//! Structured logging through `tracing`. Secret values never reach a log line:
//! they are [`SecretString`](crate::secrets::SecretString)s, which format as
//! `[REDACTED]`.

pub mod logging;

pub use logging::{init_logging, log_config_info};
