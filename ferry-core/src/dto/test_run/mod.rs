//! Batch test run DTOs

use serde::{Deserialize, Serialize};

use crate::domain::test_case::{TestCase, TestResult, TestSummary};

/// Body of `POST /api/test/run`
///
/// Also the on-disk format of a CLI test plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestsBody {
    pub bot_id: Option<String>,
    pub process_key: Option<String>,
    pub cases: Option<Vec<TestCase>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestsResponse {
    pub ok: bool,
    pub mock: bool,
    pub bot_id: String,
    pub summary: TestSummary,
    pub results: Vec<TestResult>,
}
