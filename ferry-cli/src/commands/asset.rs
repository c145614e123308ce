//! Asset command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use ferry_core::domain::asset::{AssetType, AssetValue};

use super::print_json;
use crate::config::Config;

/// Asset subcommands
#[derive(Subcommand)]
pub enum AssetCommands {
    /// Read an asset
    Get {
        /// Asset name
        name: String,
    },
    /// Create or overwrite an asset
    Set {
        /// Asset name
        name: String,

        /// Value, string-encoded whatever the type
        value: String,

        /// Declared type (Text, Integer, Bool, Credential)
        #[arg(short = 't', long = "type", default_value = "Text")]
        asset_type: AssetType,
    },
}

pub async fn handle_asset_command(command: AssetCommands, config: &Config) -> Result<()> {
    let gateway = config.gateway()?;

    match command {
        AssetCommands::Get { name } => {
            let asset = gateway.get_asset(&name).await?;
            if config.json {
                return print_json(&asset);
            }
            println!("{}", "Asset:".bold());
            println!("  Name:  {}", asset.name.cyan());
            println!("  Type:  {}", asset.asset_type);
            println!("  Value: {}", asset.value);
            if gateway.is_mock() {
                println!("{}", "  (simulated value)".dimmed());
            }
            Ok(())
        }
        AssetCommands::Set {
            name,
            value,
            asset_type,
        } => {
            gateway
                .set_asset(AssetValue {
                    name: name.clone(),
                    asset_type,
                    value,
                })
                .await
                .with_context(|| format!("Failed to set asset {}", name))?;
            if !config.json {
                println!("{} Asset {} saved", "✓".green(), name.cyan());
            }
            Ok(())
        }
    }
}
