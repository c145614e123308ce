//! Simulated job lifecycle
//!
//! A simulated job moves Pending -> Running -> terminal purely as a function
//! of the time elapsed since creation. Nothing runs in the background: the
//! state is advanced whenever the job is read, and the recorded phase only
//! ever moves forward even if the clock steps backwards.

use chrono::{DateTime, Duration, Utc};
use ferry_core::domain::job::{JobRecord, JobStatus};
use serde_json::{Map, Value, json};

/// Time after creation at which a job starts running
pub const RUNNING_AFTER_MS: i64 = 2_000;
/// Time after creation at which a job reaches its terminal state
pub const FINISHED_AFTER_MS: i64 = 5_000;

const FAULT_MESSAGE: &str = "Error in step 3";

/// Terminal state decided when the job is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Successful { processed_count: u32 },
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Pending,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct SimulatedJob {
    pub(crate) seq: u64,
    job_id: String,
    process_key: String,
    created_at: DateTime<Utc>,
    outcome: Outcome,
    phase: Phase,
}

impl SimulatedJob {
    pub fn new(
        seq: u64,
        job_id: String,
        process_key: String,
        created_at: DateTime<Utc>,
        outcome: Outcome,
    ) -> Self {
        Self {
            seq,
            job_id,
            process_key,
            created_at,
            outcome,
            phase: Phase::Pending,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Brings the job up to date with `now`
    pub fn advance(&mut self, now: DateTime<Utc>) {
        let elapsed = now - self.created_at;
        let due = if elapsed >= Duration::milliseconds(FINISHED_AFTER_MS) {
            Phase::Finished
        } else if elapsed >= Duration::milliseconds(RUNNING_AFTER_MS) {
            Phase::Running
        } else {
            Phase::Pending
        };
        self.phase = self.phase.max(due);
    }

    pub fn status(&self) -> JobStatus {
        match (self.phase, self.outcome) {
            (Phase::Pending, _) => JobStatus::Pending,
            (Phase::Running, _) => JobStatus::Running,
            (Phase::Finished, Outcome::Successful { .. }) => JobStatus::Successful,
            (Phase::Finished, Outcome::Faulted) => JobStatus::Faulted,
        }
    }

    /// Record as of the last `advance`
    pub fn snapshot(&self) -> JobRecord {
        let started_at = (self.phase >= Phase::Running)
            .then(|| self.created_at + Duration::milliseconds(RUNNING_AFTER_MS));
        let ended_at = (self.phase == Phase::Finished)
            .then(|| self.created_at + Duration::milliseconds(FINISHED_AFTER_MS));

        let (output_arguments, info) = match (self.phase, self.outcome) {
            (Phase::Finished, Outcome::Successful { processed_count }) => (
                Some(object(json!({ "result": "OK", "processedCount": processed_count }))),
                self.pending_info(),
            ),
            (Phase::Finished, Outcome::Faulted) => (
                Some(object(json!({ "result": FAULT_MESSAGE }))),
                FAULT_MESSAGE.to_string(),
            ),
            _ => (None, self.pending_info()),
        };

        JobRecord {
            job_id: self.job_id.clone(),
            process_key: self.process_key.clone(),
            status: self.status(),
            created_at: self.created_at,
            started_at,
            ended_at,
            output_arguments,
            info: Some(info),
        }
    }

    fn pending_info(&self) -> String {
        format!("Mock job for {}", self.process_key)
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
