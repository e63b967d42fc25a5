//! Immigration profile scoring: a config-driven eligibility engine over a
//! country/visa catalog, with an optional remote recommendation source that
//! always falls back to local scoring.

pub mod advisor;
pub mod config;
pub mod error;
pub mod telemetry;
