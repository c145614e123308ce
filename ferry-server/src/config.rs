//! Server configuration
//!
//! Command-line flags with environment fallbacks. The gateway settings are
//! shared with the CLI through [`GatewayConfig`].

use std::net::SocketAddr;

use clap::Parser;
use ferry_client::GatewayConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "ferry-server")]
#[command(about = "HTTP gateway to an RPA orchestrator", long_about = None)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "FERRY_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub gateway: GatewayConfig,
}
