//! PostgreSQL Probe - `SELECT 1` Round-trip
//!
//! Borrows a connection from the shared pool for one trivial query.
//! Pool acquisition counts towards the probe, so an exhausted pool
//! shows up as an unhealthy database.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::ports::probe::{DependencyProbe, ProbeError};

/// Report key for the database dependency.
pub const DATABASE_PROBE_NAME: &str = "database";

/// Health probe over a shared PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PostgresProbe {
    /// Pool owned by the composition root.
    pool: PgPool,
}

impl PostgresProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyProbe for PostgresProbe {
    fn name(&self) -> &'static str {
        DATABASE_PROBE_NAME
    }

    async fn attempt(&self) -> Result<(), ProbeError> {
        debug!("Performing database health check");
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(ProbeError::failed)?;
        Ok(())
    }
}
