//! Gateway configuration
//!
//! Read once at startup, by the server and the CLI alike. Every flag has an
//! environment fallback so deployments can be configured without arguments.

use std::time::Duration;

use clap::Args;

use crate::error::{GatewayError, Result};

/// Orchestrator connection and simulation settings
#[derive(Debug, Clone, Args)]
pub struct GatewayConfig {
    /// Simulate the orchestrator in-process (any value other than "false" means mock)
    #[arg(
        long = "mock",
        env = "FERRY_USE_MOCK",
        default_value = "true",
        value_parser = parse_mock_flag,
        action = clap::ArgAction::Set
    )]
    pub use_mock: bool,

    /// Base URL of the real orchestrator
    #[arg(
        long,
        env = "FERRY_ORCHESTRATOR_URL",
        default_value = "https://orchestrator.example.com"
    )]
    pub base_url: String,

    /// Tenant name sent with every real-mode request
    #[arg(long, env = "FERRY_TENANT", default_value = "default")]
    pub tenant: String,

    /// Bearer credential for the real orchestrator
    #[arg(long, env = "FERRY_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Per-request timeout against the real orchestrator, in seconds
    #[arg(long, env = "FERRY_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Maximum number of simulated jobs kept in memory
    #[arg(long, env = "FERRY_MOCK_JOB_CAPACITY", default_value_t = 10_000)]
    pub mock_job_capacity: usize,

    /// Seconds a simulated job is kept after creation
    #[arg(long, env = "FERRY_MOCK_JOB_TTL", default_value_t = 3_600)]
    pub mock_job_ttl_secs: u64,

    /// Probability that a simulated job ends Faulted
    #[arg(long, env = "FERRY_MOCK_FAILURE_RATE", default_value_t = 0.1)]
    pub mock_failure_rate: f64,
}

fn parse_mock_flag(value: &str) -> std::result::Result<bool, String> {
    Ok(value != "false")
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn mock_job_ttl(&self) -> Duration {
        Duration::from_secs(self.mock_job_ttl_secs)
    }

    /// Validates the configuration for the selected mode
    pub fn validate(&self) -> Result<()> {
        if self.use_mock {
            if self.mock_job_capacity == 0 {
                return Err(GatewayError::invalid("mock_job_capacity must be greater than 0"));
            }
            if self.mock_job_ttl_secs == 0 {
                return Err(GatewayError::invalid("mock_job_ttl must be greater than 0"));
            }
            if !(0.0..=1.0).contains(&self.mock_failure_rate) {
                return Err(GatewayError::invalid(
                    "mock_failure_rate must be between 0 and 1",
                ));
            }
            return Ok(());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GatewayError::invalid(
                "base_url must start with http:// or https://",
            ));
        }

        if self.tenant.is_empty() {
            return Err(GatewayError::invalid("tenant cannot be empty"));
        }

        if self.request_timeout_secs == 0 {
            return Err(GatewayError::invalid(
                "request_timeout must be greater than 0",
            ));
        }

        if self.api_key.is_empty() {
            tracing::warn!("No API key configured; real-mode requests will be unauthenticated");
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            use_mock: true,
            base_url: "https://orchestrator.example.com".to_string(),
            tenant: "default".to_string(),
            api_key: String::new(),
            request_timeout_secs: 30,
            mock_job_capacity: 10_000,
            mock_job_ttl_secs: 3_600,
            mock_failure_rate: 0.1,
        }
    }
}
