//! Secret read commands

use anyhow::Result;
use clap::Args;
use tracing::Instrument;

use super::output::{print_records, print_secret_rows, OutputFormat, SecretRow};
use crate::function_span;
use crate::module::InfisicalSession;
use crate::secrets::{GetSecretRequest, ListSecretsRequest};

/// Where to read from; shared by `get` and `list`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScopeArgs {
    /// The ID of the project to read from
    #[arg(long, value_name = "PROJECT_ID")]
    pub project_id: String,

    /// The slug of the environment to read from (e.g. dev, prod)
    #[arg(short, long = "environment", value_name = "SLUG")]
    pub environment_slug: String,

    /// The folder path of the secrets
    #[arg(long = "path", value_name = "PATH")]
    pub secret_path: String,

    /// Do not expand secret references
    #[arg(long)]
    pub no_expand: bool,

    /// Do not include secrets pulled in through imports
    #[arg(long)]
    pub no_imports: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PrintArgs {
    /// Print the full API record; values stay redacted
    #[arg(long, conflicts_with = "reveal")]
    pub raw: bool,

    /// Print secret values in plain text
    #[arg(long)]
    pub reveal: bool,

    /// Output format (json, yaml, or table)
    #[arg(short, long, default_value = "table", value_parser = ["json", "yaml", "table"])]
    pub output: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GetArgs {
    /// Name of the secret
    #[arg(value_name = "SECRET_NAME")]
    pub secret_name: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub print: PrintArgs,
}

impl GetArgs {
    pub fn request(&self) -> GetSecretRequest {
        GetSecretRequest::new(
            self.secret_name.clone(),
            self.scope.project_id.clone(),
            self.scope.environment_slug.clone(),
            self.scope.secret_path.clone(),
        )
        .with_expand_secret_references(!self.scope.no_expand)
        .with_include_imports(!self.scope.no_imports)
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Also list secrets in sub-folders
    #[arg(long)]
    pub recursive: bool,

    /// Only list secrets carrying this tag slug (repeatable)
    #[arg(long = "tag", value_name = "SLUG")]
    pub tags: Vec<String>,

    #[command(flatten)]
    pub print: PrintArgs,
}

impl ListArgs {
    pub fn request(&self) -> ListSecretsRequest {
        ListSecretsRequest::new(
            self.scope.project_id.clone(),
            self.scope.environment_slug.clone(),
            self.scope.secret_path.clone(),
        )
        .with_expand_secret_references(!self.scope.no_expand)
        .with_include_imports(!self.scope.no_imports)
        .with_recursive(self.recursive)
        .with_tag_filters(self.tags.iter())
    }
}

pub async fn get_secret(session: &InfisicalSession, args: GetArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.print.output)?;
    let request = args.request();
    let span = function_span!("get_secret_by_name", project_id = %request.project_id);

    if args.print.raw {
        let record = session.get_secret_record(request).instrument(span).await?;
        return print_records(std::slice::from_ref(&record), format);
    }

    let value = session.get_secret_by_name(request).instrument(span).await?;
    print_secret_rows(&[SecretRow::new(args.secret_name, &value, args.print.reveal)], format)
}

pub async fn list_secrets(session: &InfisicalSession, args: ListArgs) -> Result<()> {
    let format = OutputFormat::parse(&args.print.output)?;
    let request = args.request();
    let span = function_span!(
        "get_secrets",
        project_id = %request.project_id,
        recursive = request.recursive
    );

    if args.print.raw {
        let listing = session.list_secrets(request).instrument(span).await?;
        let mut records = listing.secrets;
        records.extend(listing.imports.into_iter().flat_map(|import| import.secrets));
        return print_records(&records, format);
    }

    let resolved = session.get_secrets(request).instrument(span).await?;
    let rows: Vec<SecretRow> =
        resolved.iter().map(|secret| SecretRow::from_resolved(secret, args.print.reveal)).collect();
    print_secret_rows(&rows, format)
}
