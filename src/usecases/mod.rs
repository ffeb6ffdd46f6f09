//! Use Cases Layer - Application Logic
//!
//! Orchestrates domain types with port interfaces.
//!
//! Use cases:
//! - `HealthAggregator`: Composite dependency health check

pub mod health_check;

pub use health_check::{HealthAggregator, DEFAULT_PROBE_TIMEOUT};
