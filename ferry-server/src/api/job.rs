//! Job API Handlers
//!
//! HTTP endpoints for starting, fetching and listing orchestrator jobs.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use ferry_core::domain::job::{JobFilter, JobRequest, JobStatus};
use ferry_core::dto::job::{JobListResponse, JobResponse, JobsQuery, StartJobBody};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// POST /api/akabot/jobs
/// Start a job for a process
pub async fn start_job(
    State(state): State<AppState>,
    payload: Result<Json<StartJobBody>, JsonRejection>,
) -> ApiResult<Json<JobResponse>> {
    let Json(body) = payload?;

    let process_key = body
        .process_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("processKey is required".to_string()))?;

    tracing::info!("Starting job for process: {}", process_key);

    let job = state
        .gateway
        .start_job(JobRequest {
            process_key,
            robot_name: body.robot_name,
            input_arguments: body.input_arguments.unwrap_or_default(),
        })
        .await?;

    Ok(Json(JobResponse {
        ok: true,
        mock: state.gateway.is_mock(),
        job,
    }))
}

/// GET /api/akabot/jobs?jobId=
/// GET /api/akabot/jobs?processKey=&status=
/// Fetch one job, or list jobs matching the filter
pub async fn get_jobs(
    State(state): State<AppState>,
    query: Result<Query<JobsQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let mock = state.gateway.is_mock();

    if let Some(job_id) = query.job_id.filter(|id| !id.is_empty()) {
        tracing::debug!("Getting job: {}", job_id);
        let job = state.gateway.get_job_status(&job_id).await?;
        return Ok(Json(JobResponse { ok: true, mock, job }).into_response());
    }

    let status = query
        .status
        .as_deref()
        .map(str::parse::<JobStatus>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let filter = JobFilter {
        process_key: query.process_key,
        status,
    };

    tracing::debug!("Listing jobs: {:?}", filter);
    let jobs = state.gateway.list_jobs(&filter).await?;

    Ok(Json(JobListResponse { ok: true, mock, jobs }).into_response())
}
