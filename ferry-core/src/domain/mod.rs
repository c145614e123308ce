//! Core domain types
//!
//! These types are shared between the gateway backends (which produce them),
//! the test runner (which consumes them) and the HTTP layer (which serializes
//! them). Field names serialize in camelCase to match the dashboard contract.

pub mod asset;
pub mod job;
pub mod test_case;
