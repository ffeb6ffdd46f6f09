//! Metrics and Instrumentation Adapters
//!
//! Prometheus registry plus the axum middleware that feeds it. The
//! registry is rendered by the `/metrics` route in `adapters::http`.

pub mod middleware;
pub mod prometheus;

pub use middleware::{track_requests, UNMATCHED_PATH};
pub use prometheus::MetricsRegistry;
