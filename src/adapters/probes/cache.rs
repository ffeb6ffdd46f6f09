//! Redis Probe - `PING` Round-trip

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::debug;

use crate::ports::probe::{DependencyProbe, ProbeError};

/// Report key for the cache dependency.
pub const REDIS_PROBE_NAME: &str = "redis";

/// Health probe over a shared Redis connection manager.
///
/// The manager is cheap to clone and reconnects on its own after the
/// socket drops: an attempt that hits a dead socket fails, and the next
/// one runs on a fresh connection.
#[derive(Clone)]
pub struct RedisProbe {
    conn: ConnectionManager,
}

impl RedisProbe {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl DependencyProbe for RedisProbe {
    fn name(&self) -> &'static str {
        REDIS_PROBE_NAME
    }

    async fn attempt(&self) -> Result<(), ProbeError> {
        debug!("Performing Redis health check");
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(ProbeError::failed)?;

        if reply == "PONG" {
            Ok(())
        } else {
            Err(ProbeError::Failed(format!("unexpected PING reply: {reply}")))
        }
    }
}
