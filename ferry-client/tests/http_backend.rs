//! Networked backend against a stub orchestrator
//!
//! The stub speaks just enough OData to exercise the wire mapping, and
//! rejects requests without the expected credentials.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ferry_client::{Gateway, GatewayError, HttpBackend};
use ferry_core::domain::asset::{AssetType, AssetValue};
use ferry_core::domain::job::{JobFilter, JobRequest, JobStatus};
use serde_json::{Value, json};

const API_KEY: &str = "secret-key";
const TENANT: &str = "acme";

#[derive(Default)]
struct StubState {
    assets: Mutex<HashMap<String, Value>>,
    filters: Mutex<Vec<String>>,
    start_bodies: Mutex<Vec<Value>>,
}

type Shared = Arc<StubState>;

fn authorized(headers: &HeaderMap) -> bool {
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let tenant = headers.get("x-akabot-tenantname").and_then(|v| v.to_str().ok());
    bearer == Some(format!("Bearer {}", API_KEY).as_str()) && tenant == Some(TENANT)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "missing credentials").into_response()
}

async fn start_jobs(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.start_bodies.lock().unwrap().push(body);
    Json(json!({
        "value": [{
            "Id": 4711,
            "State": "Pending",
            "CreationTime": "2025-03-01T09:00:00.000Z"
        }]
    }))
    .into_response()
}

async fn list_jobs(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let Some(filter) = query.get("$filter") else {
        return Json(json!({
            "value": [
                {"Id": 1, "State": "Successful", "CreationTime": "2025-03-01T09:00:00Z"},
                {"Id": 2, "State": "Stopping", "CreationTime": "2025-03-01T09:01:00Z"},
                {"Id": 3, "State": "Running", "CreationTime": "2025-03-01T09:02:00Z"}
            ]
        }))
        .into_response();
    };
    state.filters.lock().unwrap().push(filter.clone());
    Json(json!({
        "value": [{
            "Id": 1,
            "ReleaseName": "Invoice",
            "State": "Faulted",
            "CreationTime": "2025-03-01T09:00:00Z",
            "Info": "Error in step 3"
        }]
    }))
    .into_response()
}

async fn get_job(headers: HeaderMap, Path(resource): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match resource.as_str() {
        "Jobs(4711)" => Json(json!({
            "Id": 4711,
            "ReleaseName": "Invoice",
            "State": "Successful",
            "CreationTime": "2025-03-01T09:00:00Z",
            "StartTime": "2025-03-01T09:00:02Z",
            "EndTime": "2025-03-01T09:00:05Z",
            "OutputArguments": "{\"result\":\"OK\",\"processedCount\":12}"
        }))
        .into_response(),
        "Jobs(500)" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => (StatusCode::NOT_FOUND, "no such job").into_response(),
    }
}

async fn write_asset(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let name = body["Name"].as_str().unwrap_or_default().to_string();
    state.assets.lock().unwrap().insert(name, body);
    StatusCode::CREATED.into_response()
}

async fn read_assets(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let filter = query.get("$filter").cloned().unwrap_or_default();
    state.filters.lock().unwrap().push(filter.clone());

    let assets = state.assets.lock().unwrap();
    let matching: Vec<Value> = assets
        .iter()
        .filter(|(name, _)| filter == format!("Name eq '{}'", name))
        .map(|(_, asset)| asset.clone())
        .collect();
    Json(json!({ "value": matching })).into_response()
}

async fn status(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    StatusCode::OK.into_response()
}

async fn spawn_stub() -> (String, Shared) {
    let state = Shared::default();
    let app = Router::new()
        .route("/api/v1/odata/Jobs/StartJobs", post(start_jobs))
        .route("/api/v1/odata/Jobs", get(list_jobs))
        .route("/api/v1/odata/Assets", get(read_assets).post(write_asset))
        .route("/api/v1/odata/{resource}", get(get_job))
        .route("/api/status", get(status))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn gateway(base_url: &str, api_key: &str) -> Gateway {
    Gateway::new(Arc::new(HttpBackend::new(base_url, TENANT, api_key)))
}

#[tokio::test]
async fn test_asset_round_trip_returns_stored_value() {
    let (url, state) = spawn_stub().await;
    let gateway = gateway(&url, API_KEY);

    gateway
        .set_asset(AssetValue {
            name: "retries".to_string(),
            asset_type: AssetType::Integer,
            value: "42".to_string(),
        })
        .await
        .unwrap();

    let asset = gateway.get_asset("retries").await.unwrap();
    assert_eq!(asset.value, "42");
    assert_eq!(asset.asset_type, AssetType::Integer);
    assert_eq!(
        state.filters.lock().unwrap().last().map(String::as_str),
        Some("Name eq 'retries'")
    );
}

#[tokio::test]
async fn test_unknown_asset_is_not_found() {
    let (url, _state) = spawn_stub().await;
    let err = gateway(&url, API_KEY).get_asset("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Asset not found: missing"));
}

#[tokio::test]
async fn test_start_job_sends_start_info() {
    let (url, state) = spawn_stub().await;
    let gateway = gateway(&url, API_KEY);

    let mut request = JobRequest::new("Invoice");
    request.robot_name = Some("robot-01".to_string());
    request
        .input_arguments
        .insert("invoiceNo".to_string(), json!("INV-1"));

    let job = gateway.start_job(request).await.unwrap();
    assert_eq!(job.job_id, "4711");
    assert_eq!(job.process_key, "Invoice");
    assert_eq!(job.status, JobStatus::Pending);

    let bodies = state.start_bodies.lock().unwrap();
    let start_info = &bodies[0]["startInfo"];
    assert_eq!(start_info["ReleaseKey"], "Invoice");
    assert_eq!(start_info["RobotIds"], json!(["robot-01"]));
    assert_eq!(start_info["Strategy"], "Specific");
    assert_eq!(start_info["InputArguments"], r#"{"invoiceNo":"INV-1"}"#);
}

#[tokio::test]
async fn test_get_job_maps_terminal_record() {
    let (url, _state) = spawn_stub().await;
    let job = gateway(&url, API_KEY).get_job_status("4711").await.unwrap();

    assert_eq!(job.status, JobStatus::Successful);
    assert!(job.started_at.is_some());
    assert!(job.ended_at.is_some());
    let output = job.output_arguments.unwrap();
    assert_eq!(output["result"], "OK");
    assert_eq!(output["processedCount"], 12);
}

#[tokio::test]
async fn test_missing_job_is_not_found() {
    let (url, _state) = spawn_stub().await;
    let err = gateway(&url, API_KEY).get_job_status("99").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let (url, _state) = spawn_stub().await;
    let err = gateway(&url, API_KEY).get_job_status("500").await.unwrap_err();
    match err {
        GatewayError::Upstream { status, body } => {
            assert_eq!(status, Some(500));
            assert_eq!(body, "boom");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_credentials_are_rejected() {
    let (url, _state) = spawn_stub().await;
    let err = gateway(&url, "wrong").get_asset("retries").await.unwrap_err();
    assert!(matches!(err, GatewayError::Upstream { status: Some(401), .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_list_jobs_sends_filter() {
    let (url, state) = spawn_stub().await;
    let filter = JobFilter {
        process_key: Some("Invoice".to_string()),
        status: Some(JobStatus::Faulted),
    };

    let jobs = gateway(&url, API_KEY).list_jobs(&filter).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].info.as_deref(), Some("Error in step 3"));
    assert_eq!(
        state.filters.lock().unwrap().as_slice(),
        ["ReleaseName eq 'Invoice' and State eq 'Faulted'".to_string()]
    );
}

#[tokio::test]
async fn test_list_jobs_skips_unmappable_states() {
    let (url, _state) = spawn_stub().await;

    let jobs = gateway(&url, API_KEY)
        .list_jobs(&JobFilter::default())
        .await
        .unwrap();

    let ids: Vec<&str> = jobs.iter().map(|job| job.job_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(jobs[0].status, JobStatus::Successful);
    assert_eq!(jobs[1].status, JobStatus::Running);
}

#[tokio::test]
async fn test_health_reports_reachability() {
    let (url, _state) = spawn_stub().await;
    assert!(gateway(&url, API_KEY).health().await.is_ok());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = gateway(&closed, API_KEY).health().await.unwrap_err();
    assert!(matches!(err, GatewayError::Upstream { status: None, .. }));
    assert!(err.is_retryable());
}
