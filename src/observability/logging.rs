//! # Structured Logging
//!
//! Subscriber setup and span helpers for plugin function calls.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::InfisicalConfig;
use crate::errors::{Error, Result};

/// Create a tracing span for one plugin function call.
///
/// ```rust,ignore
/// let span = function_span!("get_secrets", project_id = %request.project_id);
/// ```
#[macro_export]
macro_rules! function_span {
    ($function:expr) => {
        tracing::info_span!(
            "function_call",
            function = %$function,
            call_id = %uuid::Uuid::new_v4()
        )
    };
    ($function:expr, $($field:tt)*) => {
        tracing::info_span!(
            "function_call",
            function = %$function,
            call_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `default_level`. Returns an error if the filter does
/// not parse; an already-installed subscriber (tests, embedding hosts) is left
/// in place.
pub fn init_logging(default_level: &str, json: bool) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(default_level),
    }
    .map_err(|e| Error::config(format!("Invalid log filter: {}", e)))?;

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.with_target(false).try_init()
    };

    if installed.is_err() {
        tracing::debug!("global subscriber already installed, keeping it");
    }
    Ok(())
}

/// Log configuration at startup
pub fn log_config_info(config: &InfisicalConfig) {
    tracing::info!(
        api_url = %config.api_url,
        timeout_seconds = config.timeout_seconds,
        log_json = config.log_json,
        "Infisical module configuration"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_compile() {
        let _span = function_span!("get_secret_by_name");
        let _span = function_span!("get_secrets", project_id = "proj-1", recursive = true);
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        // With RUST_LOG set the default level is ignored and a subscriber
        // could be installed, which the traced tests rely on not happening.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let err = init_logging("infisical_secrets=loudest", false);
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_log_config_info() {
        log_config_info(&InfisicalConfig::default());
    }
}
