//! Configuration model loaded by the config loader.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for Skyroute
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Flight data provider connection settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Incremental lookup policy
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Itinerary search market settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider connection configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// API key sent as `x-rapidapi-key`
    #[serde(default)]
    pub api_key: String,

    /// Host sent as `x-rapidapi-host`
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Locale passed with location lookups
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side request pacing in requests per second
    #[serde(default = "default_rate_limit_rps")]
    pub rate_limit_rps: f64,
}

fn default_api_host() -> String {
    "sky-scrapper.p.rapidapi.com".to_string()
}

fn default_base_url() -> String {
    "https://sky-scrapper.p.rapidapi.com/api".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_rate_limit_rps() -> f64 {
    5.0
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_host: default_api_host(),
            base_url: default_base_url(),
            locale: default_locale(),
            timeout_secs: default_timeout_secs(),
            rate_limit_rps: default_rate_limit_rps(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_host", &self.api_host)
            .field("base_url", &self.base_url)
            .field("locale", &self.locale)
            .field("timeout_secs", &self.timeout_secs)
            .field("rate_limit_rps", &self.rate_limit_rps)
            .finish()
    }
}

/// Incremental lookup policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LookupConfig {
    /// Quiet period before a typed query is dispatched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length (in characters) that issues a lookup
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_min_query_len() -> usize {
    2
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl LookupConfig {
    /// Debounce quiet period as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Itinerary search market configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Currency prices are quoted in.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Provider market (locale) for itinerary results.
    #[serde(default = "default_market")]
    pub market: String,

    /// Country the search is made from.
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Provider sort order (`best`, `cheapest`, `fastest`)
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_market() -> String {
    "en-US".to_string()
}

fn default_country_code() -> String {
    "US".to_string()
}

fn default_sort_by() -> String {
    "best".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            market: default_market(),
            country_code: default_country_code(),
            sort_by: default_sort_by(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation for file output: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.provider.api_key.is_empty());
        assert_eq!(config.provider.api_host, "sky-scrapper.p.rapidapi.com");
        assert_eq!(config.provider.locale, "en-US");
        assert_eq!(config.lookup.debounce(), Duration::from_millis(300));
        assert_eq!(config.lookup.min_query_len, 2);
        assert_eq!(config.search.currency, "USD");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_provider_debug_redacts_key() {
        let provider = ProviderConfig {
            api_key: "super-secret-key-0123456789".to_string(),
            ..Default::default()
        };
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "lookup:\n  debounce_ms: 150\n";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(config.lookup.debounce_ms, 150);
        assert_eq!(config.lookup.min_query_len, 2);
        assert_eq!(config.provider.timeout_secs, 30);
    }
}
