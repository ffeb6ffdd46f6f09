//! Persistence Adapters - PostgreSQL and Redis Handles
//!
//! Opens the shared client handles at startup and implements the
//! `ProductCatalog` port on top of PostgreSQL. The service never
//! owns schema or data; it only reads.

pub mod connection;
pub mod products;

pub use connection::{connect_postgres, connect_redis};
pub use products::PgProductCatalog;
