//! Storefront Service — Entry Point
//!
//! Wiring sequence:
//! 1. Load `.env`, then config (defaults -> CONFIG_PATH file -> env)
//! 2. Init tracing (JSON structured logging)
//! 3. Connect PostgreSQL and Redis (fatal on failure)
//! 4. Register database + cache probes with the health aggregator
//! 5. Create Prometheus registry and the product catalog
//! 6. Build router (instrumented) and spawn the HTTP server
//! 7. Wait for SIGINT/SIGTERM → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::fmt::format::FmtSpan;

use storefront_service::adapters::http::{router, shutdown_signal, supervise, AppState, HttpServer};
use storefront_service::adapters::metrics::MetricsRegistry;
use storefront_service::adapters::persistence::{
    connect_postgres, connect_redis, PgProductCatalog,
};
use storefront_service::adapters::probes::{PostgresProbe, RedisProbe};
use storefront_service::config;
use storefront_service::domain::EventKind;
use storefront_service::usecases::HealthAggregator;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let _ = dotenvy::dotenv();
    let config = config::loader::load_config().context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with_span_events(FmtSpan::CLOSE)
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .init();

    info!(
        event = %EventKind::Startup,
        version = env!("CARGO_PKG_VERSION"),
        "Starting storefront service"
    );
    config.log_summary();

    // ── 3. Connect dependencies (refuse to serve without them) ─
    let pool = match connect_postgres(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(event = %EventKind::Startup, error = %format!("{e:#}"), "Failed to connect to PostgreSQL");
            return Err(e);
        }
    };
    let redis_conn = match connect_redis(&config.redis).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(event = %EventKind::Startup, error = %format!("{e:#}"), "Failed to connect to Redis");
            return Err(e);
        }
    };

    // ── 4. Health aggregator with both probes ───────────────
    let aggregator = HealthAggregator::new()
        .with_probe(
            Arc::new(PostgresProbe::new(pool.clone())),
            config.database.probe_timeout(),
        )?
        .with_probe(
            Arc::new(RedisProbe::new(redis_conn)),
            config.redis.probe_timeout(),
        )?;

    // ── 5. Metrics + catalog ────────────────────────────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to register metrics")?);
    info!(event = %EventKind::Startup, "Prometheus metrics registered");

    let catalog = Arc::new(PgProductCatalog::new(pool.clone()));

    // ── 6. Router + HTTP server ─────────────────────────────
    let state = AppState::new(aggregator, catalog, metrics);
    let server = HttpServer::new(router(state), config.server.bind_address.clone());

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let server_handle = tokio::spawn(server.run(shutdown_rx));

    // ── 7. Wait for a signal, or for the server to die ──────
    supervise(server_handle, shutdown_signal(), shutdown_tx).await?;

    pool.close().await;
    info!(event = %EventKind::Shutdown, "Shutdown complete");
    Ok(())
}
