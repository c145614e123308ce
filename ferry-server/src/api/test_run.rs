//! Batch Test Run API Handler
//!
//! Runs every submitted case through the test runner, one after another, and
//! reports each result with the aggregate counts. Individual case failures
//! and timeouts are part of the report; only a gateway failure fails the
//! request.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use ferry_core::dto::test_run::{RunTestsBody, RunTestsResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// POST /api/test/run
pub async fn run_tests(
    State(state): State<AppState>,
    payload: Result<Json<RunTestsBody>, JsonRejection>,
) -> ApiResult<Json<RunTestsResponse>> {
    let Json(body) = payload?;

    let present = |value: Option<String>| value.filter(|s| !s.trim().is_empty());
    let (Some(bot_id), Some(process_key), Some(cases)) =
        (present(body.bot_id), present(body.process_key), body.cases)
    else {
        return Err(ApiError::BadRequest(
            "botId, processKey and cases are required".to_string(),
        ));
    };
    if cases.is_empty() {
        return Err(ApiError::BadRequest("cases must not be empty".to_string()));
    }

    let report = state.runner.run_batch(&bot_id, &process_key, &cases).await?;

    Ok(Json(RunTestsResponse {
        ok: true,
        mock: state.gateway.is_mock(),
        bot_id,
        summary: report.summary,
        results: report.results,
    }))
}
