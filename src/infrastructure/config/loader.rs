//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Longest accepted debounce quiet period.
const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Minimum query length of zero.
    #[error("Invalid min_query_len: {0}. Must be at least 1")]
    InvalidMinQueryLen(usize),

    /// Debounce outside 1..=5000 ms.
    #[error("Invalid debounce_ms: {0}. Must be between 1 and 5000")]
    InvalidDebounce(u64),

    /// Non-positive or non-finite request rate.
    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    /// Request timeout of zero.
    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown rotation policy.
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    /// Empty provider base URL.
    #[error("Provider base_url cannot be empty")]
    EmptyBaseUrl,

    /// Empty provider host header.
    #[error("Provider api_host cannot be empty")]
    EmptyApiHost,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .skyroute/config.yaml (project config)
    /// 3. .skyroute/local.yaml (local overrides, optional)
    /// 4. Environment variables (SKYROUTE_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".skyroute/config.yaml"))
            .merge(Yaml::file(".skyroute/local.yaml"))
            .merge(Env::prefixed("SKYROUTE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("SKYROUTE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// The API key is not checked here; the provider client rejects a missing
    /// key when it is constructed.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.lookup.min_query_len == 0 {
            return Err(ConfigError::InvalidMinQueryLen(config.lookup.min_query_len));
        }

        if config.lookup.debounce_ms == 0 || config.lookup.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::InvalidDebounce(config.lookup.debounce_ms));
        }

        if config.provider.rate_limit_rps <= 0.0 || !config.provider.rate_limit_rps.is_finite() {
            return Err(ConfigError::InvalidRateLimit(config.provider.rate_limit_rps));
        }

        if config.provider.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.provider.timeout_secs));
        }

        if config.provider.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.provider.api_host.trim().is_empty() {
            return Err(ConfigError::EmptyApiHost);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
