//! Dependency Probe Adapters
//!
//! Implement `crate::ports::probe::DependencyProbe` over the real
//! clients. Timeouts are applied by the caller, not here.

pub mod cache;
pub mod database;

pub use cache::{RedisProbe, REDIS_PROBE_NAME};
pub use database::{PostgresProbe, DATABASE_PROBE_NAME};
