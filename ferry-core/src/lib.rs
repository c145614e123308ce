//! Ferry Core
//!
//! Core types shared by the Ferry gateway, server and CLI.
//!
//! This crate contains:
//! - Domain types: jobs, assets and test cases as the orchestrator sees them
//! - DTOs: request/response envelopes of the HTTP surface

pub mod domain;
pub mod dto;
