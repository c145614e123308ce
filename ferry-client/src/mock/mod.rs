//! In-process orchestrator simulation
//!
//! Jobs get `JOB-<n>` ids from a per-backend counter and a terminal outcome
//! rolled at creation time; their visible status then follows the
//! [`simulation`] timeline. Assets are never stored: `set_asset` is only
//! acknowledged and `get_asset` answers a placeholder derived from the name.

pub mod clock;
pub mod simulation;
mod store;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use ferry_core::domain::asset::{AssetType, AssetValue};
use ferry_core::domain::job::{JobFilter, JobRecord, JobRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::backend::OrchestratorBackend;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use simulation::{FINISHED_AFTER_MS, RUNNING_AFTER_MS};

use simulation::{Outcome, SimulatedJob};
use store::JobStore;

const FIRST_JOB_NUMBER: u64 = 1000;

/// Tunables of the simulation
#[derive(Debug, Clone)]
pub struct MockSettings {
    pub job_capacity: usize,
    pub job_ttl: Duration,
    pub failure_rate: f64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            job_capacity: 10_000,
            job_ttl: Duration::from_secs(3_600),
            failure_rate: 0.1,
        }
    }
}

impl From<&GatewayConfig> for MockSettings {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            job_capacity: config.mock_job_capacity,
            job_ttl: config.mock_job_ttl(),
            failure_rate: config.mock_failure_rate,
        }
    }
}

pub struct MockBackend {
    jobs: Mutex<JobStore>,
    issued: AtomicU64,
    failure_rate: f64,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
}

impl MockBackend {
    pub fn new(settings: MockSettings) -> Self {
        let ttl = chrono::Duration::from_std(settings.job_ttl)
            .unwrap_or_else(|_| chrono::Duration::days(365));
        Self {
            jobs: Mutex::new(JobStore::new(settings.job_capacity, ttl)),
            issued: AtomicU64::new(0),
            failure_rate: settings.failure_rate.clamp(0.0, 1.0),
            clock: Arc::new(SystemClock),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the wall clock, typically with a [`ManualClock`]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Makes job outcomes reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn roll_outcome(&self) -> Outcome {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        if rng.gen_bool(self.failure_rate) {
            Outcome::Faulted
        } else {
            Outcome::Successful {
                processed_count: rng.gen_range(10..60),
            }
        }
    }

    fn jobs(&self) -> std::sync::MutexGuard<'_, JobStore> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(MockSettings::default())
    }
}

#[async_trait]
impl OrchestratorBackend for MockBackend {
    fn is_mock(&self) -> bool {
        true
    }

    async fn start_job(&self, req: &JobRequest) -> Result<JobRecord> {
        let seq = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        let job_id = format!("JOB-{}", FIRST_JOB_NUMBER + seq);
        let now = self.clock.now();

        let job = SimulatedJob::new(
            seq,
            job_id.clone(),
            req.process_key.clone(),
            now,
            self.roll_outcome(),
        );
        let record = job.snapshot();
        self.jobs().insert(job, now);

        info!("[mock] Started job {} for process {}", job_id, req.process_key);
        Ok(record)
    }

    async fn get_job(&self, job_id: &str) -> Result<JobRecord> {
        let now = self.clock.now();
        let record = self
            .jobs()
            .get(job_id, now)
            .ok_or_else(|| GatewayError::NotFound(format!("Job not found: {}", job_id)))?;

        debug!("[mock] Job {} is {}", job_id, record.status);
        Ok(record)
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRecord>> {
        let now = self.clock.now();
        let jobs = self
            .jobs()
            .snapshots(now)
            .into_iter()
            .filter(|job| filter.matches(job))
            .collect();
        Ok(jobs)
    }

    async fn set_asset(&self, asset: &AssetValue) -> Result<()> {
        info!("[mock] setAsset: {} = {}", asset.name, asset.value);
        Ok(())
    }

    async fn get_asset(&self, name: &str) -> Result<AssetValue> {
        Ok(AssetValue {
            name: name.to_string(),
            asset_type: AssetType::Text,
            value: format!("mock_value_for_{}", name),
        })
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use ferry_core::domain::job::JobStatus;
    use std::collections::HashSet;

    fn backend(failure_rate: f64) -> (MockBackend, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let backend = MockBackend::new(MockSettings {
            failure_rate,
            ..Default::default()
        })
        .with_clock(clock.clone())
        .with_seed(7);
        (backend, clock)
    }

    #[tokio::test]
    async fn test_job_ids_are_sequential_and_unique() {
        let (backend, _) = backend(0.1);
        let mut seen = HashSet::new();
        for expected in 1001..=1050 {
            let job = backend.start_job(&JobRequest::new("Invoice")).await.unwrap();
            assert_eq!(job.job_id, format!("JOB-{}", expected));
            assert_eq!(job.status, JobStatus::Pending);
            assert!(seen.insert(job.job_id));
        }
    }

    #[tokio::test]
    async fn test_invoice_job_walks_through_lifecycle() {
        let (backend, clock) = backend(0.1);
        let job = backend.start_job(&JobRequest::new("Invoice")).await.unwrap();
        assert_eq!(job.info.as_deref(), Some("Mock job for Invoice"));

        let pending = backend.get_job(&job.job_id).await.unwrap();
        assert_eq!(pending.status, JobStatus::Pending);

        clock.advance(ChronoDuration::milliseconds(RUNNING_AFTER_MS));
        let running = backend.get_job(&job.job_id).await.unwrap();
        assert_eq!(running.status, JobStatus::Running);
        assert!(running.started_at.is_some());

        clock.advance(ChronoDuration::milliseconds(FINISHED_AFTER_MS));
        let done = backend.get_job(&job.job_id).await.unwrap();
        assert!(matches!(done.status, JobStatus::Successful | JobStatus::Faulted));
        assert!(done.output_arguments.is_some());
        assert!(done.ended_at.is_some());
    }

    #[tokio::test]
    async fn test_failure_rate_extremes() {
        let (always_ok, clock) = backend(0.0);
        let job = always_ok.start_job(&JobRequest::new("Invoice")).await.unwrap();
        clock.advance(ChronoDuration::seconds(6));
        let done = always_ok.get_job(&job.job_id).await.unwrap();
        assert_eq!(done.status, JobStatus::Successful);
        let count = done.output_arguments.unwrap()["processedCount"]
            .as_u64()
            .unwrap();
        assert!((10..60).contains(&count));

        let (always_fault, clock) = backend(1.0);
        let job = always_fault.start_job(&JobRequest::new("Invoice")).await.unwrap();
        clock.advance(ChronoDuration::seconds(6));
        let done = always_fault.get_job(&job.job_id).await.unwrap();
        assert_eq!(done.status, JobStatus::Faulted);
    }

    #[tokio::test]
    async fn test_outcomes_are_mostly_successful() {
        let (backend, clock) = backend(0.1);
        for _ in 0..1000 {
            backend.start_job(&JobRequest::new("Bulk")).await.unwrap();
        }
        clock.advance(ChronoDuration::seconds(6));
        let successful = backend
            .list_jobs(&JobFilter {
                status: Some(JobStatus::Successful),
                ..Default::default()
            })
            .await
            .unwrap()
            .len();
        assert!((850..=950).contains(&successful), "got {}", successful);
    }

    #[tokio::test]
    async fn test_polling_never_regresses() {
        let (backend, clock) = backend(0.1);
        let job = backend.start_job(&JobRequest::new("Invoice")).await.unwrap();

        let rank = |status: JobStatus| match status {
            JobStatus::Pending => 0,
            JobStatus::Running => 1,
            _ => 2,
        };
        let mut last = 0;
        for _ in 0..30 {
            clock.advance(ChronoDuration::milliseconds(250));
            let status = backend.get_job(&job.job_id).await.unwrap().status;
            assert!(rank(status) >= last);
            last = rank(status);
        }
        assert_eq!(last, 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_process_key() {
        let (backend, _) = backend(0.1);
        backend.start_job(&JobRequest::new("Invoice")).await.unwrap();
        backend.start_job(&JobRequest::new("Payroll")).await.unwrap();
        backend.start_job(&JobRequest::new("Invoice")).await.unwrap();

        let all = backend.list_jobs(&JobFilter::default()).await.unwrap();
        let invoices = backend
            .list_jobs(&JobFilter {
                process_key: Some("Invoice".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(invoices.len(), 2);
        assert!(invoices.iter().all(|job| job.process_key == "Invoice"));
        assert!(invoices.iter().all(|job| all.contains(job)));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let (backend, _) = backend(0.1);
        let err = backend.get_job("JOB-424242").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_assets_do_not_round_trip() {
        let (backend, _) = backend(0.1);
        backend
            .set_asset(&AssetValue::text("x", "42"))
            .await
            .unwrap();
        let asset = backend.get_asset("x").await.unwrap();
        assert_eq!(asset.value, "mock_value_for_x");
        assert_ne!(asset.value, "42");
        assert_eq!(asset.asset_type, AssetType::Text);
    }

    #[tokio::test]
    async fn test_capacity_bounds_registry() {
        let backend = MockBackend::new(MockSettings {
            job_capacity: 3,
            ..Default::default()
        })
        .with_clock(Arc::new(ManualClock::default()));
        for _ in 0..5 {
            backend.start_job(&JobRequest::new("Invoice")).await.unwrap();
        }
        let jobs = backend.list_jobs(&JobFilter::default()).await.unwrap();
        assert_eq!(jobs.len(), 3);
        assert!(backend.get_job("JOB-1001").await.unwrap_err().is_not_found());
        assert!(backend.get_job("JOB-1005").await.is_ok());
    }
}
