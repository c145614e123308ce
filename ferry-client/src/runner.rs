//! Test-case runner
//!
//! Executes a test case end to end on top of the gateway: stage the input as
//! an asset, start a job, poll it to a terminal state and classify the
//! output. Batches run strictly one case at a time, in input order, so the
//! orchestrator never sees more than one test job from a batch at once.
//!
//! A poll deadline is reported as an `error` result, never as an `Err`, so a
//! single hung case cannot abort a batch. The timed-out job is left running.

use std::time::Duration;

use chrono::Utc;
use ferry_core::domain::asset::AssetValue;
use ferry_core::domain::job::{JobRecord, JobRequest, JobStatus};
use ferry_core::domain::test_case::{TestCase, TestOutcome, TestResult, TestSummary};
use serde_json::Value;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::compare::{describe_mismatch, looks_successful};
use crate::error::Result;
use crate::gateway::Gateway;

const ERROR_MARKER: &str = "execution error";
const NO_OUTPUT_MARKER: &str = "no output";

/// Poll cadence and overall deadline of a test case
#[derive(Debug, Clone, Copy)]
pub struct RunnerSettings {
    /// Delay between two status polls
    pub poll_interval: Duration,
    /// Budget for the whole test case, measured from staging the input
    pub deadline: Duration,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            deadline: Duration::from_secs(60),
        }
    }
}

/// How polling a job ended
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The job reached a terminal status
    Finished(JobRecord),
    /// The deadline passed first; carries the last observed record
    TimedOut(JobRecord),
}

/// Results of a batch, in input order, with their tally
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub summary: TestSummary,
    pub results: Vec<TestResult>,
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    gateway: Gateway,
    settings: RunnerSettings,
}

impl TestRunner {
    pub fn new(gateway: Gateway) -> Self {
        Self::with_settings(gateway, RunnerSettings::default())
    }

    pub fn with_settings(gateway: Gateway, settings: RunnerSettings) -> Self {
        Self { gateway, settings }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn settings(&self) -> RunnerSettings {
        self.settings
    }

    /// Polls `job` until it is terminal or `deadline` passes
    ///
    /// Sleeps between polls; the last sleep is shortened so the final poll
    /// happens at the deadline rather than after it.
    pub async fn poll_until_terminal(
        &self,
        job: JobRecord,
        deadline: Instant,
    ) -> Result<PollOutcome> {
        let mut current = job;
        while !current.status.is_terminal() {
            let now = Instant::now();
            if now >= deadline {
                return Ok(PollOutcome::TimedOut(current));
            }

            time::sleep_until((now + self.settings.poll_interval).min(deadline)).await;
            current = self.gateway.get_job_status(&current.job_id).await?;
            debug!("Job {} is {}", current.job_id, current.status);
        }
        Ok(PollOutcome::Finished(current))
    }

    /// Runs one test case and classifies its outcome
    ///
    /// Staging, job start and poll failures propagate as errors; a poll
    /// timeout does not.
    pub async fn run_test_case(
        &self,
        bot_id: &str,
        process_key: &str,
        case: &TestCase,
    ) -> Result<TestResult> {
        let started = Instant::now();
        let deadline = started + self.settings.deadline;

        let staged_input = Value::Object(case.input_data.clone()).to_string();
        self.gateway
            .set_asset(AssetValue::text(
                format!("test_input_{}_{}", bot_id, case.case_id),
                staged_input,
            ))
            .await?;

        let mut input_arguments = serde_json::Map::new();
        input_arguments.insert("testMode".to_string(), Value::Bool(true));
        input_arguments.insert("testCaseId".to_string(), Value::String(case.case_id.clone()));
        input_arguments.extend(case.input_data.clone());

        let job = self
            .gateway
            .start_job(JobRequest {
                process_key: process_key.to_string(),
                robot_name: None,
                input_arguments,
            })
            .await?;
        let job_id = job.job_id.clone();

        let outcome = self.poll_until_terminal(job, deadline).await?;

        let result = |status, actual_output: String, diff_detail| TestResult {
            job_id: job_id.clone(),
            bot_id: bot_id.to_string(),
            case_id: case.case_id.clone(),
            status,
            actual_output,
            expected_output: case.expected_output.clone(),
            diff_detail,
            duration: format_duration(started.elapsed()),
            timestamp: Utc::now(),
        };

        let finished = match outcome {
            PollOutcome::TimedOut(last) => {
                warn!(
                    "Test case {} timed out with job {} still {}",
                    case.case_id, job_id, last.status
                );
                return Ok(result(
                    TestOutcome::Error,
                    String::new(),
                    Some(format!(
                        "timeout: job did not finish within {} seconds",
                        self.settings.deadline.as_secs()
                    )),
                ));
            }
            PollOutcome::Finished(record) => record,
        };

        if finished.status == JobStatus::Faulted {
            let actual = finished
                .output_arguments
                .as_ref()
                .and_then(|output| output.get("result"))
                .and_then(Value::as_str)
                .unwrap_or(ERROR_MARKER)
                .to_string();
            let detail = format!(
                "job faulted: {}",
                finished.info.as_deref().unwrap_or("unknown")
            );
            return Ok(result(TestOutcome::Error, actual, Some(detail)));
        }

        let actual = finished
            .output_arguments
            .as_ref()
            .map(|output| Value::Object(output.clone()).to_string())
            .unwrap_or_else(|| NO_OUTPUT_MARKER.to_string());

        if looks_successful(&actual) {
            Ok(result(TestOutcome::Pass, actual, None))
        } else {
            let detail = describe_mismatch(&case.expected_output, &actual);
            Ok(result(TestOutcome::Fail, actual, Some(detail)))
        }
    }

    /// Runs every case in order, one at a time
    pub async fn run_batch(
        &self,
        bot_id: &str,
        process_key: &str,
        cases: &[TestCase],
    ) -> Result<BatchReport> {
        info!(
            "Running {} test case(s) for bot {} against {}",
            cases.len(),
            bot_id,
            process_key
        );

        let mut summary = TestSummary::default();
        let mut results = Vec::with_capacity(cases.len());

        for case in cases {
            let result = self.run_test_case(bot_id, process_key, case).await?;
            debug!("Case {} finished: {:?}", case.case_id, result.status);
            summary.record(result.status);
            results.push(result);
        }

        info!(
            "Bot {}: {} pass, {} fail, {} error",
            bot_id, summary.pass, summary.fail, summary.error
        );

        Ok(BatchReport { summary, results })
    }
}

fn format_duration(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}
