#[tokio::main]
async fn main() -> anyhow::Result<()> {
    infisical_secrets::cli::run_cli().await
}
