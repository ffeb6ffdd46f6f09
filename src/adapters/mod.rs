//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (PostgreSQL, Redis, Prometheus, axum).
//!
//! Adapter categories:
//! - `http`: Routes, handlers, and the server loop
//! - `metrics`: Prometheus registry and request instrumentation
//! - `persistence`: Startup connections and the product catalog
//! - `probes`: Database and cache dependency probes

pub mod http;
pub mod metrics;
pub mod persistence;
pub mod probes;
