//! Orchestrator backend abstraction
//!
//! The gateway talks to exactly one backend, chosen once at construction:
//! [`crate::http::HttpBackend`] for a real orchestrator or
//! [`crate::mock::MockBackend`] for the in-process simulation. Backends see
//! already-validated input; validation lives in [`crate::Gateway`].

use async_trait::async_trait;
use ferry_core::domain::asset::AssetValue;
use ferry_core::domain::job::{JobFilter, JobRecord, JobRequest};

use crate::error::Result;

/// Uniform job/asset contract over a real or simulated orchestrator
#[async_trait]
pub trait OrchestratorBackend: Send + Sync {
    /// Whether results come from the simulation rather than a real orchestrator
    fn is_mock(&self) -> bool;

    /// Starts a job and returns its freshly created record
    async fn start_job(&self, req: &JobRequest) -> Result<JobRecord>;

    /// Fetches the current state of a job
    ///
    /// Fails with `NotFound` if the id is unknown.
    async fn get_job(&self, job_id: &str) -> Result<JobRecord>;

    /// Lists jobs matching the filter, in no particular order
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRecord>>;

    /// Creates or overwrites an asset
    async fn set_asset(&self, asset: &AssetValue) -> Result<()>;

    /// Reads an asset by name
    async fn get_asset(&self, name: &str) -> Result<AssetValue>;

    /// Checks that the orchestrator is reachable
    async fn health(&self) -> Result<()>;
}
