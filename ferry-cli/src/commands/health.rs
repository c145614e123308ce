//! Health command handler

use anyhow::Result;
use colored::*;
use ferry_core::dto::HealthResponse;

use super::print_json;
use crate::config::Config;

pub async fn handle_health_command(config: &Config) -> Result<()> {
    let gateway = config.gateway()?;
    let result = gateway.health().await;

    if config.json {
        print_json(&HealthResponse {
            ok: result.is_ok(),
            mock: gateway.is_mock(),
            upstream: if result.is_ok() { "healthy" } else { "unreachable" }.to_string(),
        })?;
    } else {
        let mode = if gateway.is_mock() { "mock" } else { "real" };
        match &result {
            Ok(()) => println!("{} Orchestrator healthy ({})", "✓".green(), mode),
            Err(_) => println!("{} Orchestrator unreachable ({})", "✗".red(), mode),
        }
    }

    result.map_err(Into::into)
}
