//! Ferry CLI
//!
//! Command-line interface driving the orchestrator gateway and the test
//! runner directly, without a running server.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use ferry_client::GatewayConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ferry")]
#[command(about = "RPA orchestrator job, asset and test CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    gateway: GatewayConfig,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config {
        gateway: cli.gateway,
        json: cli.json,
    };

    handle_command(cli.command, &config).await
}
