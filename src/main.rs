//! Sanad - Omani-dialect voice support assistant
//!
//! CLI entry point.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use sanad_core::format_error_for_cli;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sanad=info,sanad_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    if cli.command.is_some() {
        info!("Starting Sanad v{}", env!("CARGO_PKG_VERSION"));

        if !std::path::Path::new(".env").exists() {
            warn!(".env file not found; credentials must come from the environment.");
        }
    }

    match cli::run(cli).await {
        Err(e) => match e.downcast_ref::<sanad_core::Error>() {
            Some(core) => {
                eprint!("{}", format_error_for_cli(core));
                std::process::exit(1);
            }
            None => Err(e),
        },
        ok => ok,
    }
}
