//! Health Aggregator - Composite Dependency Check
//!
//! Runs every registered probe once, each under its own timeout, and
//! merges the outcomes into a `HealthReport`:
//! - Probes run concurrently, so a check costs the slowest probe
//! - A timeout is just another unhealthy outcome
//! - No retries inside a single check
//! - Error text is logged here and never reaches the report

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tracing::{info, instrument, warn};

use crate::domain::{EventKind, HealthReport, ProbeResult};
use crate::ports::probe::{DependencyProbe, ProbeError};

/// Default per-probe bound when none is configured.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// A probe paired with its time bound.
#[derive(Clone)]
struct RegisteredProbe {
  probe: Arc<dyn DependencyProbe>,
  timeout: Duration,
}

/// Merges all dependency probes into one health report.
///
/// Cheap to clone; probes are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct HealthAggregator {
  probes: Vec<RegisteredProbe>,
}

impl HealthAggregator {
  /// Create an aggregator with no probes.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a probe under its own timeout.
  ///
  /// # Errors
  /// Fails if a probe with the same name is already registered or the
  /// timeout is zero.
  pub fn register(
    &mut self,
    probe: Arc<dyn DependencyProbe>,
    timeout: Duration,
  ) -> anyhow::Result<()> {
    anyhow::ensure!(
      !timeout.is_zero(),
      "Probe {} must have a non-zero timeout",
      probe.name()
    );
    anyhow::ensure!(
      self.probes.iter().all(|p| p.probe.name() != probe.name()),
      "Probe {} registered twice",
      probe.name()
    );
    self.probes.push(RegisteredProbe { probe, timeout });
    Ok(())
  }

  /// Builder-style `register`.
  pub fn with_probe(
    mut self,
    probe: Arc<dyn DependencyProbe>,
    timeout: Duration,
  ) -> anyhow::Result<Self> {
    self.register(probe, timeout)?;
    Ok(self)
  }

  /// Names of all registered probes, in registration order.
  pub fn probe_names(&self) -> Vec<&'static str> {
    self.probes.iter().map(|p| p.probe.name()).collect()
  }

  /// Run every probe once and return the raw results.
  pub async fn run_probes(&self) -> Vec<ProbeResult> {
    join_all(
      self
        .probes
        .iter()
        .map(|p| probe_with_timeout(p.probe.as_ref(), p.timeout)),
    )
    .await
  }

  /// Run a full health check.
  #[instrument(skip(self))]
  pub async fn check(&self) -> HealthReport {
    let started = Instant::now();
    let results = self.run_probes().await;
    let report = HealthReport::from_results(&results);

    let statuses = serde_json::to_string(&report).unwrap_or_default();
    info!(
      event = %EventKind::HealthCheck,
      healthy = report.is_healthy(),
      status_code = report.status_code(),
      statuses = %statuses,
      elapsed_ms = started.elapsed().as_millis() as u64,
      "Health check"
    );

    report
  }
}

/// Run one probe bounded by `timeout`.
///
/// Never fails: errors and timeouts become an unhealthy `ProbeResult`
/// and are logged as a probe failure.
pub async fn probe_with_timeout(
  probe: &dyn DependencyProbe,
  timeout: Duration,
) -> ProbeResult {
  let name = probe.name();
  let outcome = match tokio::time::timeout(timeout, probe.attempt()).await {
    Ok(inner) => inner,
    Err(_) => Err(ProbeError::Timeout(timeout.as_millis())),
  };

  match outcome {
    Ok(()) => ProbeResult::healthy(name),
    Err(e) => {
      warn!(
        event = %EventKind::ProbeFailure,
        dependency = name,
        error = %e,
        "Dependency probe failed"
      );
      ProbeResult::unhealthy(name, e.to_string())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use async_trait::async_trait;

  struct StaticProbe {
    name: &'static str,
    healthy: bool,
  }

  #[async_trait]
  impl DependencyProbe for StaticProbe {
    fn name(&self) -> &'static str {
      self.name
    }

    async fn attempt(&self) -> Result<(), ProbeError> {
      if self.healthy {
        Ok(())
      } else {
        Err(ProbeError::Failed("connection refused".to_string()))
      }
    }
  }

  struct SlowProbe {
    name: &'static str,
    delay: Duration,
  }

  #[async_trait]
  impl DependencyProbe for SlowProbe {
    fn name(&self) -> &'static str {
      self.name
    }

    async fn attempt(&self) -> Result<(), ProbeError> {
      tokio::time::sleep(self.delay).await;
      Ok(())
    }
  }

  fn aggregator(db: bool, redis: bool) -> HealthAggregator {
    HealthAggregator::new()
      .with_probe(
        Arc::new(StaticProbe { name: "database", healthy: db }),
        DEFAULT_PROBE_TIMEOUT,
      )
      .unwrap()
      .with_probe(
        Arc::new(StaticProbe { name: "redis", healthy: redis }),
        DEFAULT_PROBE_TIMEOUT,
      )
      .unwrap()
  }

  #[tokio::test]
  async fn test_all_healthy_is_200() {
    let report = aggregator(true, true).check().await;
    assert!(report.is_healthy());
    assert_eq!(report.status_code(), 200);
    assert_eq!(report.len(), 2);
  }

  #[tokio::test]
  async fn test_any_unhealthy_is_503() {
    for (db, redis) in [(true, false), (false, true), (false, false)] {
      let report = aggregator(db, redis).check().await;
      assert_eq!(report.status_code(), 503, "db={db} redis={redis}");
      assert_eq!(report.status_of("database").unwrap().is_ok(), db);
      assert_eq!(report.status_of("redis").unwrap().is_ok(), redis);
    }
  }

  #[tokio::test]
  async fn test_slow_probe_times_out_as_unhealthy() {
    let agg = HealthAggregator::new()
      .with_probe(
        Arc::new(SlowProbe { name: "redis", delay: Duration::from_secs(10) }),
        Duration::from_millis(50),
      )
      .unwrap();

    let started = Instant::now();
    let results = agg.run_probes().await;
    assert!(started.elapsed() < Duration::from_secs(5));

    assert_eq!(results.len(), 1);
    assert!(!results[0].healthy);
    assert!(results[0].error.as_deref().unwrap().contains("timed out"));
  }

  #[tokio::test]
  async fn test_probes_run_concurrently() {
    let agg = HealthAggregator::new()
      .with_probe(
        Arc::new(SlowProbe { name: "database", delay: Duration::from_millis(400) }),
        Duration::from_secs(2),
      )
      .unwrap()
      .with_probe(
        Arc::new(SlowProbe { name: "redis", delay: Duration::from_secs(10) }),
        Duration::from_millis(400),
      )
      .unwrap();

    // Sequential execution would take at least 800ms.
    let started = Instant::now();
    let report = agg.check().await;
    assert!(started.elapsed() < Duration::from_millis(750));
    assert_eq!(report.status_of("database").unwrap().as_str(), "ok");
    assert_eq!(report.status_of("redis").unwrap().as_str(), "unreachable");
  }

  #[test]
  fn test_duplicate_registration_rejected() {
    let result = aggregator(true, true).with_probe(
      Arc::new(StaticProbe { name: "redis", healthy: true }),
      DEFAULT_PROBE_TIMEOUT,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_zero_timeout_rejected() {
    let result = HealthAggregator::new().with_probe(
      Arc::new(StaticProbe { name: "database", healthy: true }),
      Duration::ZERO,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_probe_names_in_registration_order() {
    assert_eq!(aggregator(true, true).probe_names(), vec!["database", "redis"]);
  }
}
