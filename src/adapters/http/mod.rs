//! HTTP Adapters - Routes and Server
//!
//! Thin glue binding the health aggregator, catalog, and metrics to
//! axum routes.

pub mod routes;
pub mod server;

pub use routes::{router, ApiError, AppState};
pub use server::{shutdown_signal, supervise, HttpServer};
