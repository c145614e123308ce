//! Job DTOs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::job::JobRecord;

/// Body of `POST /api/akabot/jobs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJobBody {
    pub process_key: Option<String>,
    pub robot_name: Option<String>,
    pub input_arguments: Option<Map<String, Value>>,
}

/// Query of `GET /api/akabot/jobs`: either `jobId`, or the list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsQuery {
    pub job_id: Option<String>,
    pub process_key: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub ok: bool,
    pub mock: bool,
    pub job: JobRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub ok: bool,
    pub mock: bool,
    pub jobs: Vec<JobRecord>,
}
