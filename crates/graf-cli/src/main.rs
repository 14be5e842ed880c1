//! CLI entry point.

use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;
use graf_cli::{Cli, execute};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads GRAF_GLUON_TOP_DIR
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("{e:#}");
    }

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
