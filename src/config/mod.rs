//! Configuration Module - Service Configuration
//!
//! Built-in defaults match a local development setup (Postgres and
//! Redis on localhost). An optional TOML file and then environment
//! variables override them; see `loader` for the precedence rules.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::domain::EventKind;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// HTTP listener and logging.
  pub server: ServerConfig,
  /// PostgreSQL connection and probe settings.
  pub database: DatabaseConfig,
  /// Redis connection and probe settings.
  pub redis: RedisConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Listener bind address.
  pub bind_address: String,
  /// Log level (trace, debug, info, warn, error).
  pub log_level: String,
}

/// PostgreSQL configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
  pub host: String,
  pub port: u16,
  pub user: String,
  pub password: String,
  pub name: String,
  /// Upper bound on pooled connections.
  pub max_connections: u32,
  /// Health probe bound (milliseconds).
  pub probe_timeout_ms: u64,
}

/// Redis configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
  pub host: String,
  pub port: u16,
  /// Health probe bound (milliseconds).
  pub probe_timeout_ms: u64,
}

impl AppConfig {
  /// Log the effective settings, secrets excluded.
  ///
  /// Call after the tracing subscriber is installed; loading itself
  /// stays silent.
  pub fn log_summary(&self) {
    info!(
      event = %EventKind::Startup,
      bind_address = %self.server.bind_address,
      log_level = %self.server.log_level,
      db_host = %self.database.host,
      db_port = self.database.port,
      db_name = %self.database.name,
      db_max_connections = self.database.max_connections,
      redis_host = %self.redis.host,
      redis_port = self.redis.port,
      "Configuration loaded"
    );
  }
}

impl DatabaseConfig {
  pub const fn probe_timeout(&self) -> Duration {
    Duration::from_millis(self.probe_timeout_ms)
  }
}

impl RedisConfig {
  pub const fn probe_timeout(&self) -> Duration {
    Duration::from_millis(self.probe_timeout_ms)
  }

  /// Connection URL for the redis client (database 0).
  pub fn url(&self) -> String {
    format!("redis://{}:{}/0", self.host, self.port)
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: default_bind_address(),
      log_level: default_log_level(),
    }
  }
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: 5432,
      user: "postgres".to_string(),
      password: "postgres".to_string(),
      name: "storefront".to_string(),
      max_connections: 10,
      probe_timeout_ms: default_probe_timeout_ms(),
    }
  }
}

impl Default for RedisConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: 6379,
      probe_timeout_ms: default_probe_timeout_ms(),
    }
  }
}

// Default value functions

fn default_bind_address() -> String {
  "0.0.0.0:8080".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_host() -> String {
  "localhost".to_string()
}

const fn default_probe_timeout_ms() -> u64 {
  2_000
}
