//! clipsend sender entry point.

mod app;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,clipsend=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(receiver) = cli.receiver {
        config.receiver_endpoint = receiver;
    }
    if let Some(pool_size) = cli.pool_size {
        config.pool_size = pool_size;
    }
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        receiver = %config.receiver_endpoint,
        "starting clipsend"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let output = rt.block_on(app::run(&config, cli.command))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
