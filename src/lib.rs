//! Credit eligibility decision service.
//!
//! The `scoring` module holds the deterministic decision pipeline: behavioral
//! credit assessment, feature transformation, and the boundary search over
//! loan amounts against an injected classifier. The remaining modules are the
//! service shell (configuration, telemetry, HTTP error mapping).

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
