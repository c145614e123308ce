//! Configuration module
//!
//! Handles CLI configuration: the gateway settings and output format.

use anyhow::{Context, Result};
use ferry_client::{Gateway, GatewayConfig};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Orchestrator connection and simulation settings
    pub gateway: GatewayConfig,
    /// Emit JSON rather than human-readable text
    pub json: bool,
}

impl Config {
    pub fn gateway(&self) -> Result<Gateway> {
        Gateway::from_config(&self.gateway).context("Invalid gateway configuration")
    }
}
