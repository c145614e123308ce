//! API Module
//!
//! HTTP API layer for the gateway.
//! Each submodule handles endpoints for a specific domain.

pub mod asset;
pub mod error;
pub mod health;
pub mod job;
pub mod test_run;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use ferry_client::{Gateway, TestRunner};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub runner: TestRunner,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            runner: TestRunner::new(gateway.clone()),
            gateway,
        }
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Job endpoints
        .route("/api/akabot/jobs", get(job::get_jobs).post(job::start_job))
        // Asset endpoints
        .route(
            "/api/akabot/assets",
            get(asset::get_asset).post(asset::set_asset),
        )
        // Test run endpoints
        .route("/api/test/run", post(test_run::run_tests))
        // Add state and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
