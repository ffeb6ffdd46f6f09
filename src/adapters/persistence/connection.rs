//! Startup Connections - PostgreSQL Pool and Redis Client
//!
//! Creates the long-lived client handles the rest of the service
//! shares. Both connectors verify the dependency with one round-trip
//! before returning; any failure here is fatal to startup.

use std::time::Duration;

use anyhow::{Context, Result};
use redis::aio::ConnectionManager;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::config::{DatabaseConfig, RedisConfig};
use crate::domain::EventKind;

/// Bound on the initial Redis connect and `PING`.
const REDIS_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Open the PostgreSQL pool and ping it.
///
/// # Errors
/// Returns an error if no connection can be established or `SELECT 1`
/// fails.
#[instrument(skip(config), fields(host = %config.host, port = config.port, db = %config.name))]
pub async fn connect_postgres(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.probe_timeout())
        .connect_with(options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Failed to ping PostgreSQL")?;

    info!(event = %EventKind::Startup, "Connected to PostgreSQL");
    Ok(pool)
}

/// Open a reconnecting Redis connection and `PING` it.
///
/// The returned manager re-establishes the socket after the server drops
/// it, so later probes see the current reachability.
///
/// # Errors
/// Returns an error if the URL is invalid, or the connection or `PING`
/// fails or exceeds two seconds.
#[instrument(skip(config), fields(host = %config.host, port = config.port))]
pub async fn connect_redis(config: &RedisConfig) -> Result<ConnectionManager> {
    let client = redis::Client::open(config.url()).context("Invalid Redis URL")?;

    let mut conn = tokio::time::timeout(
        REDIS_CONNECT_TIMEOUT,
        client.get_connection_manager(),
    )
    .await
    .context("Timed out connecting to Redis")?
    .context("Failed to connect to Redis")?;

    let _: String = tokio::time::timeout(
        REDIS_CONNECT_TIMEOUT,
        redis::cmd("PING").query_async(&mut conn),
    )
    .await
    .context("Timed out pinging Redis")?
    .context("Failed to ping Redis")?;

    info!(event = %EventKind::Startup, "Connected to Redis");
    Ok(conn)
}
