//! Dependency Probe Port - Liveness of External Systems
//!
//! Defines the single capability the health aggregator needs from an
//! external dependency: one cheap round-trip that either succeeds or
//! fails. Concrete adapters wrap a client handle created elsewhere.

use async_trait::async_trait;
use thiserror::Error;

/// Why a probe attempt failed.
#[derive(Debug, Error)]
pub enum ProbeError {
  /// The round-trip did not finish within the configured bound.
  #[error("probe timed out after {0} ms")]
  Timeout(u128),
  /// The dependency answered with an error or the transport failed.
  #[error("probe failed: {0}")]
  Failed(String),
}

impl ProbeError {
  /// Wrap any displayable client error.
  pub fn failed(err: impl std::fmt::Display) -> Self {
    Self::Failed(err.to_string())
  }
}

/// Trait for dependency probes.
///
/// Implementors must not mutate application data and must not create or
/// close the client they wrap. The caller bounds every `attempt` with a
/// timeout, so implementors do not need their own.
#[async_trait]
pub trait DependencyProbe: Send + Sync + 'static {
  /// Stable key used in the health report (`"database"`, `"redis"`).
  fn name(&self) -> &'static str;

  /// Perform one lightweight round-trip.
  async fn attempt(&self) -> Result<(), ProbeError>;
}
