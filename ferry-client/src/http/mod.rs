//! Networked orchestrator backend
//!
//! Talks to the orchestrator's OData API under `<base_url>/api/v1`. Every
//! request carries the bearer credential and the tenant header. No retries
//! are attempted: a non-success status surfaces as
//! [`GatewayError::Upstream`] with the status and body for the caller to act on.

mod assets;
mod jobs;
pub(crate) mod odata;

use async_trait::async_trait;
use ferry_core::domain::asset::AssetValue;
use ferry_core::domain::job::{JobFilter, JobRecord, JobRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::backend::OrchestratorBackend;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// Header naming the tenant on every request
pub const TENANT_HEADER: &str = "X-AKABOT-TenantName";

const API_PREFIX: &str = "/api/v1";

/// HTTP client for a real orchestrator
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Base URL of the orchestrator (e.g., "https://orchestrator.example.com")
    base_url: String,
    tenant: String,
    api_key: String,
    client: Client,
}

impl HttpBackend {
    /// Creates a backend with a default HTTP client
    pub fn new(
        base_url: impl Into<String>,
        tenant: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(base_url, tenant, api_key, Client::new())
    }

    /// Creates a backend with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        tenant: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant: tenant.into(),
            api_key: api_key.into(),
            client,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(
            config.base_url.clone(),
            config.tenant.clone(),
            config.api_key.clone(),
            client,
        ))
    }

    /// Get the base URL of the orchestrator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts an authenticated request against an API path
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        self.authorized(self.client.request(method, url))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(CONTENT_TYPE, "application/json")
            .header(TENANT_HEADER, &self.tenant)
            .bearer_auth(&self.api_key)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Checks the status code and deserializes the JSON body
    ///
    /// `not_found` names the resource reported when upstream answers 404.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        not_found: Option<String>,
    ) -> Result<T> {
        let response = self.check_status(response, not_found).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("Failed to parse JSON response: {}", e)))
    }

    /// Checks the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response, None).await?;
        Ok(())
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        not_found: Option<String>,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == StatusCode::NOT_FOUND {
            if let Some(resource) = not_found {
                return Err(GatewayError::NotFound(resource));
            }
        }

        tracing::warn!("Orchestrator answered {}: {}", status, body);
        Err(GatewayError::upstream(status.as_u16(), body))
    }
}

#[async_trait]
impl OrchestratorBackend for HttpBackend {
    fn is_mock(&self) -> bool {
        false
    }

    async fn start_job(&self, req: &JobRequest) -> Result<JobRecord> {
        self.start_jobs(req).await
    }

    async fn get_job(&self, job_id: &str) -> Result<JobRecord> {
        self.fetch_job(job_id).await
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobRecord>> {
        self.query_jobs(filter).await
    }

    async fn set_asset(&self, asset: &AssetValue) -> Result<()> {
        self.write_asset(asset).await
    }

    async fn get_asset(&self, name: &str) -> Result<AssetValue> {
        self.read_asset(name).await
    }

    async fn health(&self) -> Result<()> {
        let url = format!("{}/api/status", self.base_url);
        let response = self.authorized(self.client.get(&url)).send().await?;
        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:8080/", "default", "key");
        assert_eq!(backend.base_url(), "http://localhost:8080");
        assert!(!backend.is_mock());
    }

    #[test]
    fn test_from_config_uses_configured_url() {
        let config = GatewayConfig {
            use_mock: false,
            base_url: "http://orchestrator.local".to_string(),
            ..Default::default()
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.base_url(), "http://orchestrator.local");
    }
}
