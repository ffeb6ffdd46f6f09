//! Structured log event kinds.
//!
//! Every log record the service emits on a core path carries an
//! `event` field taken from this closed set, so log pipelines can
//! filter health traffic apart from request or startup lines.

use serde::Serialize;

/// Event type tag attached to structured log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Process boot and dependency connection steps.
    Startup,
    /// One aggregated health check completed.
    HealthCheck,
    /// A single dependency probe failed or timed out.
    ProbeFailure,
    /// An HTTP request finished (any status).
    RequestHandled,
    /// A data-serving query failed.
    QueryFailure,
    /// Server stopping.
    Shutdown,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::HealthCheck => "health_check",
            Self::ProbeFailure => "probe_failure",
            Self::RequestHandled => "request_handled",
            Self::QueryFailure => "query_failure",
            Self::Shutdown => "shutdown",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
