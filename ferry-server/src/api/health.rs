//! Health Check API Handler
//!
//! Reports the mode and whether the orchestrator behind it answers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use ferry_core::dto::HealthResponse;

use crate::api::AppState;

/// GET /health
/// 200 when the backend is reachable, 503 otherwise
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mock = state.gateway.is_mock();

    match state.gateway.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                ok: true,
                mock,
                upstream: "healthy".to_string(),
            }),
        ),
        Err(err) => {
            tracing::warn!("Orchestrator health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    ok: false,
                    mock,
                    upstream: "unreachable".to_string(),
                }),
            )
        }
    }
}
