//! HTTP Routes - Endpoint Handlers and Router Assembly
//!
//! | Method    | Path        | Handler      |
//! |-----------|-------------|--------------|
//! | GET       | `/`         | greeting     |
//! | GET       | `/healthz`  | health check |
//! | GET, POST | `/login`    | login stub   |
//! | GET       | `/products` | product list |
//! | GET       | `/metrics`  | Prometheus   |
//!
//! Every route, `/metrics` and `/healthz` included, runs behind the
//! request instrumentation middleware.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use tracing::{debug, error};

use crate::adapters::metrics::{track_requests, MetricsRegistry};
use crate::domain::EventKind;
use crate::ports::catalog::{CatalogError, ProductCatalog};
use crate::usecases::HealthAggregator;

/// Greeting served at `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to the storefront service!";

/// Body of every `/login` response.
pub const LOGIN_MESSAGE: &str = "Logged in";

/// Fixed body for catalog failures. Never carries error detail.
pub const DB_ERROR_MESSAGE: &str = "DB error";

/// Prometheus text exposition content type.
const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Shared state handed to every handler.
///
/// Built once by the composition root; clones share the same
/// aggregator probes, catalog, and metrics.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: HealthAggregator,
    pub catalog: Arc<dyn ProductCatalog>,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    pub fn new(
        aggregator: HealthAggregator,
        catalog: Arc<dyn ProductCatalog>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            aggregator,
            catalog,
            metrics,
        }
    }
}

/// Handler failures mapped to fixed, non-descriptive responses.
#[derive(Debug)]
pub enum ApiError {
    /// Product query failed.
    Catalog(CatalogError),
    /// Metrics could not be rendered.
    Metrics(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Catalog(e) => {
                error!(event = %EventKind::QueryFailure, error = %e, "DB query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, DB_ERROR_MESSAGE).into_response()
            }
            Self::Metrics(e) => {
                error!(error = %e, "Failed to render metrics");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

/// Build the application router with instrumentation applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/login", get(login).post(login))
        .route("/products", get(products))
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.metrics),
            track_requests,
        ))
        .with_state(state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn root() -> &'static str {
    debug!("Root endpoint called");
    WELCOME_MESSAGE
}

/// Composite health: 200 when every dependency is ok, else 503.
async fn healthz(State(state): State<AppState>) -> Response {
    let report = state.aggregator.check().await;
    state.metrics.record_health(&report);

    let status =
        StatusCode::from_u16(report.status_code()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
    (status, Json(report)).into_response()
}

async fn login() -> &'static str {
    debug!("Login endpoint called");
    LOGIN_MESSAGE
}

async fn products(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let names = state.catalog.list_product_names().await?;
    Ok(Json(names))
}

async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.metrics.encode().map_err(ApiError::Metrics)?;
    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body).into_response())
}
