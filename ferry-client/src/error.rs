//! Error types for the Ferry gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur when talking to the orchestrator
///
/// The gateway never retries; `is_retryable` lets callers decide.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Caller-supplied input failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Job id or asset name unknown to the backing store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network failure or non-success status from the orchestrator
    #[error("{}", upstream_message(*status, body))]
    Upstream {
        /// HTTP status code, absent for transport-level failures
        status: Option<u16>,
        /// Response body or transport error description
        body: String,
    },

    /// Orchestrator answered with a body we could not interpret
    #[error("Failed to decode orchestrator response: {0}")]
    Decode(String),
}

fn upstream_message(status: Option<u16>, body: &str) -> String {
    match status {
        Some(status) => format!("Orchestrator error (status {}): {}", status, body),
        None => format!("Orchestrator unreachable: {}", body),
    }
}

impl GatewayError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status: Some(status),
            body: body.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Transport failures and 5xx/429 answers are worth retrying, nothing else is
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status: None, .. } => true,
            Self::Upstream {
                status: Some(status),
                ..
            } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Upstream {
            status: err.status().map(|s| s.as_u16()),
            body: err.to_string(),
        }
    }
}
