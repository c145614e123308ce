//! Job-related orchestrator endpoints

use ferry_core::domain::job::{JobFilter, JobRecord, JobRequest};
use reqwest::Method;
use serde_json::{Value, json};

use super::HttpBackend;
use super::odata::{Collection, ODataJob, job_filter_expression};
use crate::error::{GatewayError, Result};

impl HttpBackend {
    /// Starts one job through the StartJobs action
    ///
    /// Input arguments travel as a JSON-encoded string, as the orchestrator
    /// expects. The response is either a `value` collection or a bare job.
    pub(super) async fn start_jobs(&self, req: &JobRequest) -> Result<JobRecord> {
        let input_arguments = serde_json::to_string(&req.input_arguments)
            .map_err(|e| GatewayError::invalid(format!("inputArguments: {}", e)))?;
        let body = json!({
            "startInfo": {
                "ReleaseKey": req.process_key,
                "RobotIds": req.robot_name.iter().collect::<Vec<_>>(),
                "Strategy": "Specific",
                "InputArguments": input_arguments,
            }
        });

        let response = self
            .request(Method::POST, "/odata/Jobs/StartJobs")
            .json(&body)
            .send()
            .await?;
        let data: Value = self.handle_response(response, None).await?;

        let started = match data.get("value").and_then(Value::as_array) {
            Some(jobs) => jobs
                .first()
                .cloned()
                .ok_or_else(|| GatewayError::Decode("StartJobs returned no jobs".to_string()))?,
            None => data,
        };
        let job: ODataJob = serde_json::from_value(started)
            .map_err(|e| GatewayError::Decode(format!("StartJobs response: {}", e)))?;

        let record = job.into_record(Some(&req.process_key))?;
        tracing::info!("Started job {} for process {}", record.job_id, req.process_key);
        Ok(record)
    }

    /// Fetches one job by id
    pub(super) async fn fetch_job(&self, job_id: &str) -> Result<JobRecord> {
        let response = self
            .request(Method::GET, &format!("/odata/Jobs({})", job_id))
            .send()
            .await?;
        let job: ODataJob = self
            .handle_response(response, Some(format!("Job not found: {}", job_id)))
            .await?;

        job.into_record(None)
    }

    /// Lists jobs, filtered server-side
    ///
    /// Rows that cannot be mapped (e.g. a state such as `Stopping`) are
    /// logged and left out instead of failing the whole listing.
    pub(super) async fn query_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRecord>> {
        let mut request = self.request(Method::GET, "/odata/Jobs");
        if let Some(expression) = job_filter_expression(filter) {
            request = request.query(&[("$filter", expression)]);
        }

        let response = request.send().await?;
        let jobs: Collection<ODataJob> = self.handle_response(response, None).await?;

        let records = jobs
            .value
            .into_iter()
            .filter_map(|job| match job.into_record(filter.process_key.as_deref()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping job in listing: {}", e);
                    None
                }
            })
            .collect();
        Ok(records)
    }
}
