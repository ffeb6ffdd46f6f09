//! Configuration Loader - Defaults, File, Environment
//!
//! Precedence (lowest to highest):
//! 1. Built-in defaults
//! 2. TOML file named by `CONFIG_PATH`, when set
//! 3. Environment variables (`DB_HOST`, `REDIS_PORT`, ...)
//!
//! The result is validated before it is handed to the service.

use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use super::AppConfig;

/// Environment variable naming the optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Load configuration from the process environment.
///
/// # Errors
/// Returns an error if the config file can't be read or parsed, an
/// environment value doesn't parse, or validation fails.
pub fn load_config() -> Result<AppConfig> {
  load_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` in place of the process environment.
pub fn load_with<F>(lookup: F) -> Result<AppConfig>
where
  F: Fn(&str) -> Option<String>,
{
  let mut config = match lookup(CONFIG_PATH_ENV) {
    Some(path) => load_file(&path)?,
    None => AppConfig::default(),
  };

  apply_env_overrides(&mut config, &lookup)?;
  validate_config(&config)?;

  Ok(config)
}

/// Parse a TOML config file. Missing sections fall back to defaults.
pub fn load_file(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  toml::from_str(&content)
    .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Overlay environment values on top of `config`.
fn apply_env_overrides<F>(config: &mut AppConfig, lookup: &F) -> Result<()>
where
  F: Fn(&str) -> Option<String>,
{
  override_string(lookup, "SERVER_ADDR", &mut config.server.bind_address);
  override_string(lookup, "LOG_LEVEL", &mut config.server.log_level);

  override_string(lookup, "DB_HOST", &mut config.database.host);
  override_parsed(lookup, "DB_PORT", &mut config.database.port)?;
  override_string(lookup, "DB_USER", &mut config.database.user);
  override_string(lookup, "DB_PASSWORD", &mut config.database.password);
  override_string(lookup, "DB_NAME", &mut config.database.name);
  override_parsed(lookup, "DB_MAX_CONNECTIONS", &mut config.database.max_connections)?;
  override_parsed(lookup, "DB_PROBE_TIMEOUT_MS", &mut config.database.probe_timeout_ms)?;

  override_string(lookup, "REDIS_HOST", &mut config.redis.host);
  override_parsed(lookup, "REDIS_PORT", &mut config.redis.port)?;
  override_parsed(lookup, "REDIS_PROBE_TIMEOUT_MS", &mut config.redis.probe_timeout_ms)?;

  Ok(())
}

fn override_string<F>(lookup: &F, key: &str, target: &mut String)
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(value) = lookup(key) {
    *target = value;
  }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<()>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
  T::Err: std::fmt::Display,
{
  if let Some(raw) = lookup(key) {
    *target = raw
      .trim()
      .parse()
      .map_err(|e| anyhow::anyhow!("Invalid value for {key}: {raw:?} ({e})"))?;
  }
  Ok(())
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  config
    .server
    .bind_address
    .parse::<SocketAddr>()
    .with_context(|| {
      format!("Invalid bind address: {}", config.server.bind_address)
    })?;

  anyhow::ensure!(
    !config.database.host.is_empty(),
    "Database host must not be empty"
  );
  anyhow::ensure!(config.database.port > 0, "Database port must be non-zero");
  anyhow::ensure!(
    !config.database.name.is_empty(),
    "Database name must not be empty"
  );
  anyhow::ensure!(
    config.database.max_connections > 0,
    "DB max_connections must be positive"
  );
  anyhow::ensure!(
    config.database.probe_timeout_ms > 0,
    "DB probe timeout must be positive"
  );

  anyhow::ensure!(!config.redis.host.is_empty(), "Redis host must not be empty");
  anyhow::ensure!(config.redis.port > 0, "Redis port must be non-zero");
  anyhow::ensure!(
    config.redis.probe_timeout_ms > 0,
    "Redis probe timeout must be positive"
  );

  Ok(())
}
