//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod asset;
mod health;
mod job;

pub use asset::AssetCommands;
pub use job::JobCommands;
pub use test::TestCommands;

use anyhow::Result;
use clap::Subcommand;
use serde_json::Value;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job management
    ///
    /// In mock mode jobs only live as long as one invocation; use
    /// `job start --wait` to follow a simulated job to completion.
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Asset management
    Asset {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Test-case execution
    Test {
        #[command(subcommand)]
        command: TestCommands,
    },
    /// Check that the orchestrator is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Asset { command } => asset::handle_asset_command(command, config).await,
        Commands::Test { command } => test::handle_test_command(command, config).await,
        Commands::Health => health::handle_health_command(config).await,
    }
}

/// Parse a single key=value pair
///
/// The value is taken as JSON when it parses as JSON, as a string otherwise.
fn parse_key_val(s: &str) -> Result<(String, Value)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    let raw = &s[pos + 1..];
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((s[..pos].to_string(), value))
}

/// Print any serializable value as pretty JSON
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
