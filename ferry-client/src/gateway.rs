//! Orchestrator Job/Asset Gateway
//!
//! Single entry point for job and asset operations. Input validation happens
//! here, once, before the call reaches whichever backend the gateway was
//! built with.

use std::sync::Arc;

use ferry_core::domain::asset::AssetValue;
use ferry_core::domain::job::{JobFilter, JobRecord, JobRequest};
use tracing::debug;

use crate::backend::OrchestratorBackend;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::http::HttpBackend;
use crate::mock::{MockBackend, MockSettings};

/// Cheaply cloneable handle to the configured backend
#[derive(Clone)]
pub struct Gateway {
    backend: Arc<dyn OrchestratorBackend>,
}

impl Gateway {
    pub fn new(backend: Arc<dyn OrchestratorBackend>) -> Self {
        Self { backend }
    }

    /// Builds the mock or networked backend the configuration selects
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;

        let backend: Arc<dyn OrchestratorBackend> = if config.use_mock {
            tracing::info!("Gateway running against the in-process simulation");
            Arc::new(MockBackend::new(MockSettings::from(config)))
        } else {
            tracing::info!(
                "Gateway running against {} (tenant {})",
                config.base_url,
                config.tenant
            );
            Arc::new(HttpBackend::from_config(config)?)
        };

        Ok(Self::new(backend))
    }

    pub fn is_mock(&self) -> bool {
        self.backend.is_mock()
    }

    pub async fn start_job(&self, req: JobRequest) -> Result<JobRecord> {
        if req.process_key.trim().is_empty() {
            return Err(GatewayError::invalid("processKey is required"));
        }
        self.backend.start_job(&req).await
    }

    pub async fn get_job_status(&self, job_id: &str) -> Result<JobRecord> {
        if job_id.trim().is_empty() {
            return Err(GatewayError::invalid("jobId is required"));
        }
        debug!("Fetching status of job {}", job_id);
        self.backend.get_job(job_id).await
    }

    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRecord>> {
        debug!("Listing jobs with filter {:?}", filter);
        self.backend.list_jobs(filter).await
    }

    pub async fn set_asset(&self, asset: AssetValue) -> Result<()> {
        if asset.name.is_empty() || asset.value.is_empty() {
            return Err(GatewayError::invalid("name and value are required"));
        }
        self.backend.set_asset(&asset).await
    }

    pub async fn get_asset(&self, name: &str) -> Result<AssetValue> {
        if name.is_empty() {
            return Err(GatewayError::invalid("name is required"));
        }
        self.backend.get_asset(name).await
    }

    pub async fn health(&self) -> Result<()> {
        self.backend.health().await
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("mock", &self.is_mock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::domain::job::JobStatus;

    #[tokio::test]
    async fn test_default_config_builds_mock_gateway() {
        let gateway = Gateway::from_config(&GatewayConfig::default()).unwrap();
        assert!(gateway.is_mock());
    }

    #[tokio::test]
    async fn test_real_config_builds_http_gateway() {
        let config = GatewayConfig {
            use_mock: false,
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let gateway = Gateway::from_config(&config).unwrap();
        assert!(!gateway.is_mock());
    }

    #[tokio::test]
    async fn test_start_job_requires_process_key() {
        let gateway = Gateway::new(Arc::new(MockBackend::default()));
        let err = gateway.start_job(JobRequest::new("  ")).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));

        let job = gateway.start_job(JobRequest::new("Invoice")).await.unwrap();
        assert_eq!(job.status, JobStatus::Pending);
    }

    #[tokio::test]
    async fn test_set_asset_requires_name_and_value() {
        let gateway = Gateway::new(Arc::new(MockBackend::default()));
        for asset in [AssetValue::text("", "42"), AssetValue::text("x", "")] {
            let err = gateway.set_asset(asset).await.unwrap_err();
            assert!(matches!(err, GatewayError::InvalidRequest(_)));
        }
        assert!(gateway.set_asset(AssetValue::text("x", "42")).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_asset_requires_name() {
        let gateway = Gateway::new(Arc::new(MockBackend::default()));
        assert!(matches!(
            gateway.get_asset("").await.unwrap_err(),
            GatewayError::InvalidRequest(_)
        ));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let gateway = Gateway::new(Arc::new(MockBackend::default()));
        assert!(gateway.get_job_status("JOB-1").await.unwrap_err().is_not_found());
    }
}
