//! Data Transfer Objects for the HTTP surface
//!
//! Request bodies keep required fields optional so that the endpoint layer can
//! answer a missing field with a 400 in the `{ok:false, error}` shape instead
//! of a bare deserialization rejection. Every success envelope carries `mock`
//! so callers can tell simulated data from real orchestrator data.

pub mod asset;
pub mod job;
pub mod test_run;

use serde::{Deserialize, Serialize};

/// Failure envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Success envelope for operations that return nothing but the mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    pub mock: bool,
}

/// Body of `GET /health`
///
/// `upstream` is "healthy" or "unreachable"; the mock is always healthy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub mock: bool,
    pub upstream: String,
}
