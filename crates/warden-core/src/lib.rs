//! Service plumbing shared by Warden binaries: configuration loading, health
//! probes, request ids, tracing setup and the base HTTP error.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
