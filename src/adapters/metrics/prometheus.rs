//! Prometheus Metrics Registry - HTTP and Dependency Observability
//!
//! Owns a private Prometheus registry (never the global default) so
//! tests can build isolated instances. Exposed through `/metrics` in
//! the text exposition format.

use std::time::Duration;

use anyhow::Context;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry,
    TextEncoder,
};

use crate::domain::HealthReport;

/// Centralized Prometheus metrics for the service.
///
/// Collectors are internally atomic, so one instance is shared by
/// every concurrent request behind an `Arc`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Completed requests by route and method.
    pub http_requests: IntCounterVec,
    /// Request latency by route (seconds).
    pub http_request_duration: HistogramVec,
    /// Last observed probe outcome per dependency (1 = up, 0 = down).
    pub dependency_up: IntGaugeVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["path", "method"],
        )?;

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests",
            )
            .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
            &["path"],
        )?;

        let dependency_up = IntGaugeVec::new(
            Opts::new(
                "dependency_up",
                "Dependency reachability at last health check (1=ok, 0=unreachable)",
            ),
            &["dependency"],
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;
        registry.register(Box::new(dependency_up.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_request_duration,
            dependency_up,
        })
    }

    /// Count one completed request and record its latency.
    pub fn observe_request(&self, path: &str, method: &str, elapsed: Duration) {
        self.http_requests.with_label_values(&[path, method]).inc();
        self.http_request_duration
            .with_label_values(&[path])
            .observe(elapsed.as_secs_f64());
    }

    /// Mirror a health report into the `dependency_up` gauges.
    pub fn record_health(&self, report: &HealthReport) {
        for (name, status) in report.statuses() {
            self.dependency_up
                .with_label_values(&[name.as_str()])
                .set(i64::from(status.is_ok()));
        }
    }

    /// Current request count for a (path, method) pair.
    pub fn request_count(&self, path: &str, method: &str) -> u64 {
        self.http_requests.with_label_values(&[path, method]).get()
    }

    /// Number of latency samples recorded for a path.
    pub fn latency_samples(&self, path: &str) -> u64 {
        self.http_request_duration
            .with_label_values(&[path])
            .get_sample_count()
    }

    /// Render every metric in the Prometheus text format.
    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output was not UTF-8")
    }
}
