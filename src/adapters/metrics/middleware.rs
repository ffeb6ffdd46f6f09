//! Request Instrumentation Middleware
//!
//! Wraps every route. Counts each completed request by matched route
//! and method, and records its latency by route. The wrapped
//! handler's response is passed through untouched, whatever its status.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use super::prometheus::MetricsRegistry;
use crate::domain::EventKind;

/// Path label for requests that matched no route.
///
/// Keeps label cardinality bounded when clients probe random URLs.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Axum middleware recording `http_requests_total` and
/// `http_request_duration_seconds`.
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn track_requests(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_PATH, MatchedPath::as_str)
        .to_owned();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    metrics.observe_request(&path, method.as_str(), elapsed);

    info!(
        event = %EventKind::RequestHandled,
        path = %path,
        method = %method,
        status = response.status().as_u16(),
        elapsed_us = elapsed.as_micros() as u64,
        "Request handled"
    );

    response
}
