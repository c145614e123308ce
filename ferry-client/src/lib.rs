//! Ferry Gateway Client
//!
//! Job and asset operations against an RPA orchestrator, plus the test-case
//! runner built on top of them.
//!
//! The [`Gateway`] is built once from a [`GatewayConfig`] and talks either to
//! a real orchestrator over HTTP or to an in-process simulation. Callers do
//! not need to know which: both backends honor the same contract.
//!
//! # Example
//!
//! ```no_run
//! use ferry_client::{Gateway, GatewayConfig, TestRunner};
//! use ferry_core::domain::job::JobRequest;
//!
//! #[tokio::main]
//! async fn main() -> ferry_client::Result<()> {
//!     let gateway = Gateway::from_config(&GatewayConfig::default())?;
//!
//!     let job = gateway.start_job(JobRequest::new("Invoice")).await?;
//!     println!("Started {} ({})", job.job_id, job.status);
//!
//!     let runner = TestRunner::new(gateway);
//!     let report = runner.run_batch("BOT-7", "Invoice", &[]).await?;
//!     println!("{} case(s) run", report.summary.total);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod compare;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod mock;
pub mod runner;

// Re-export commonly used types
pub use backend::OrchestratorBackend;
pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::Gateway;
pub use http::HttpBackend;
pub use mock::{MockBackend, MockSettings};
pub use runner::{BatchReport, PollOutcome, RunnerSettings, TestRunner};
