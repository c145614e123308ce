//! Test case domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One (input, expected output) pair exercised against a migrated bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub case_id: String,
    #[serde(default)]
    pub input_data: Map<String, Value>,
    #[serde(default)]
    pub expected_output: String,
}

/// Classification of a finished test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Pass,
    Fail,
    Error,
}

/// Outcome of running one test case against one job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub job_id: String,
    pub bot_id: String,
    pub case_id: String,
    pub status: TestOutcome,
    pub actual_output: String,
    pub expected_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_detail: Option<String>,
    /// Wall-clock duration, e.g. "5.2s"
    pub duration: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate counts for a batch of test results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub error: usize,
}

impl TestSummary {
    pub fn record(&mut self, outcome: TestOutcome) {
        self.total += 1;
        match outcome {
            TestOutcome::Pass => self.pass += 1,
            TestOutcome::Fail => self.fail += 1,
            TestOutcome::Error => self.error += 1,
        }
    }
}
