//! # Command Line Interface
//!
//! Calls the module functions from a shell: authenticate with Universal Auth,
//! then read one secret or list a folder. `functions` prints the catalogue
//! of module functions and their parameters.

pub mod config;
pub mod output;
pub mod secrets;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::InfisicalConfig;
use crate::module::{
    find_function, Infisical, InfisicalSession, API_URL, FUNCTIONS, MODULE_SUMMARY,
};
use crate::observability::{init_logging, log_config_info};
use crate::secrets::SecretReference;
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "infisical-secrets")]
#[command(about = "Read secrets from Infisical with a machine identity")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Infisical site URL (self-hosted instances)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Universal Auth client id: env:NAME, file:PATH or the value
    #[arg(long, global = true, value_name = "REF")]
    pub client_id: Option<SecretReference>,

    /// Universal Auth client secret: env:NAME, file:PATH or the value
    #[arg(long, global = true, value_name = "REF")]
    pub client_secret: Option<SecretReference>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get a secret by name
    #[command(
        after_help = "EXAMPLES:\n    # Print a redacted secret\n    infisical-secrets get DATABASE_URL --project-id 6f1c --environment dev --path /\n\n    # Print the value\n    infisical-secrets get DATABASE_URL --project-id 6f1c -e dev --path / --reveal --output json"
    )]
    Get(secrets::GetArgs),

    /// List secrets in a folder, imports resolved
    #[command(
        after_help = "EXAMPLES:\n    # List a folder\n    infisical-secrets list --project-id 6f1c --environment prod --path /backend\n\n    # Only secrets tagged 'db', including sub-folders\n    infisical-secrets list --project-id 6f1c -e prod --path / --recursive --tag db"
    )]
    List(secrets::ListArgs),

    /// Describe the module functions and their parameters
    Functions {
        /// Only describe this function
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Output format (json, yaml, or table)
        #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
        output: String,
    },
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_config = env_config_for(&cli.command)?;
    initialise_logging(cli.verbose, env_config.as_ref())?;
    let env_config = env_config.unwrap_or_default();

    match cli.command {
        Commands::Functions { name, output } => describe_functions(name.as_deref(), &output)?,
        Commands::Get(args) => {
            let session = authenticate(
                &env_config,
                cli.api_url,
                cli.timeout,
                cli.client_id,
                cli.client_secret,
            )
            .await?;
            secrets::get_secret(&session, args).await?
        }
        Commands::List(args) => {
            let session = authenticate(
                &env_config,
                cli.api_url,
                cli.timeout,
                cli.client_id,
                cli.client_secret,
            )
            .await?;
            secrets::list_secrets(&session, args).await?
        }
    }

    Ok(())
}

/// Resolve connection settings and credentials, then log in.
async fn authenticate(
    env_config: &InfisicalConfig,
    api_url: Option<String>,
    timeout: Option<u64>,
    client_id: Option<SecretReference>,
    client_secret: Option<SecretReference>,
) -> anyhow::Result<InfisicalSession> {
    let file = config::CliConfig::load()?;

    let settings = InfisicalConfig {
        api_url: config::resolve_api_url(api_url, &file, env_config),
        timeout_seconds: config::resolve_timeout(timeout, &file, env_config),
        ..env_config.clone()
    };
    settings.validate_all()?;
    log_config_info(&settings);

    let client_id =
        config::resolve_credential(client_id, file.client_id.as_deref(), config::ENV_CLIENT_ID)?;
    let client_secret = config::resolve_credential(
        client_secret,
        file.client_secret.as_deref(),
        config::ENV_CLIENT_SECRET,
    )?;

    let session = Infisical::from_config(&settings)?
        .with_universal_auth(&client_id, &client_secret)
        .await
        .context("Universal Auth login failed")?;
    info!(api_url = %settings.api_url, "authenticated");
    Ok(session)
}

fn describe_functions(name: Option<&str>, output: &str) -> anyhow::Result<()> {
    let format = OutputFormat::parse(output)?;
    match name {
        Some(name) => {
            let function = find_function(name).with_context(|| {
                let known: Vec<&str> = FUNCTIONS.iter().map(|f| f.name).collect();
                format!("Unknown function '{}'. Available: {}", name, known.join(", "))
            })?;
            output::print_functions(std::slice::from_ref(function), format)
        }
        None => {
            if format == OutputFormat::Table {
                println!("{}", MODULE_SUMMARY);
                println!(
                    "Constructor: {} (default {}) {}",
                    API_URL.name,
                    API_URL.default.unwrap_or("required"),
                    API_URL.doc
                );
            }
            output::print_functions(FUNCTIONS, format)
        }
    }
}

/// Environment settings a command needs. `functions` runs offline and reads none.
fn env_config_for(command: &Commands) -> anyhow::Result<Option<InfisicalConfig>> {
    match command {
        Commands::Functions { .. } => Ok(None),
        Commands::Get(_) | Commands::List(_) => Ok(Some(InfisicalConfig::from_env()?)),
    }
}

fn initialise_logging(verbose: bool, config: Option<&InfisicalConfig>) -> anyhow::Result<()> {
    let defaults = InfisicalConfig::default();
    let config = config.unwrap_or(&defaults);
    let default_level = if verbose { "debug" } else { config.log_level.as_str() };
    init_logging(default_level, config.log_json)?;
    Ok(())
}
