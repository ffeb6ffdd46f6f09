//! Health Check Benchmarks — Aggregation Overhead
//!
//! Measures what the service adds on top of the dependency round-trips:
//! concurrent probe dispatch, merging, and report serialization.
//!
//! Run with: cargo bench --bench health_bench

use std::sync::Arc;

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use storefront_service::domain::{HealthReport, ProbeResult};
use storefront_service::ports::probe::{DependencyProbe, ProbeError};
use storefront_service::usecases::{HealthAggregator, DEFAULT_PROBE_TIMEOUT};

/// In-memory probe with a fixed outcome.
struct InstantProbe {
    name: &'static str,
    healthy: bool,
}

#[async_trait]
impl DependencyProbe for InstantProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(&self) -> Result<(), ProbeError> {
        if self.healthy {
            Ok(())
        } else {
            Err(ProbeError::Failed("unreachable".to_string()))
        }
    }
}

/// Benchmark merging two probe results into a report.
fn bench_merge(c: &mut Criterion) {
    let results = vec![
        ProbeResult::healthy("database"),
        ProbeResult::unhealthy("redis", "connection refused"),
    ];

    c.bench_function("health_report_merge", |b| {
        b.iter(|| {
            let report = HealthReport::from_results(black_box(&results));
            black_box(report.status_code())
        });
    });
}

/// Benchmark serializing the response body.
fn bench_serialize(c: &mut Criterion) {
    let report = HealthReport::from_results(&[
        ProbeResult::healthy("database"),
        ProbeResult::healthy("redis"),
    ]);

    c.bench_function("health_report_serialize", |b| {
        b.iter(|| serde_json::to_vec(black_box(&report)).unwrap());
    });
}

/// Benchmark a full aggregator check with in-memory probes.
fn bench_check(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let aggregator = HealthAggregator::new()
        .with_probe(
            Arc::new(InstantProbe { name: "database", healthy: true }),
            DEFAULT_PROBE_TIMEOUT,
        )
        .unwrap()
        .with_probe(
            Arc::new(InstantProbe { name: "redis", healthy: false }),
            DEFAULT_PROBE_TIMEOUT,
        )
        .unwrap();

    c.bench_function("health_aggregator_run_probes", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(aggregator.run_probes().await)
        });
    });
}

criterion_group!(benches, bench_merge, bench_serialize, bench_check);
criterion_main!(benches);
