use anyhow::Context;
use clap::Parser;
use ferry_client::Gateway;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;

use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ferry_server=debug,ferry_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();

    tracing::info!("Starting Ferry gateway...");

    let gateway =
        Gateway::from_config(&config.gateway).context("Invalid gateway configuration")?;

    // Build router with all API endpoints
    let app = api::create_router(api::AppState::new(gateway));

    tracing::info!("Listening on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
