use chronos_client::{cli, ClientConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chronos_client=info,chronos_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();
    let config = ClientConfig::load()?;
    tracing::debug!(
        api_base_url = %config.base_url(),
        time_zone = %config.time_zone,
        session_path = %config.session_path.display(),
        "Configuration loaded"
    );

    cli::run(cli, config).await
}
