//! Traducteur command-line client
//!
//! Usage:
//!   traducteur activate <KEY>
//!   traducteur translate "Bonjour" --from fr --to en
//!   traducteur status | logout | health | languages

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use traducteur_cli::{execute, Cli, Context};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("Traducteur {} starting", env!("CARGO_PKG_VERSION"));
    let ctx = Context::from_cli(&cli)?;
    execute(&cli.command, &ctx, &mut std::io::stdout().lock()).await
}
