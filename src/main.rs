use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use weather_pro::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
    weather_pro::run(cli).await
}
