//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Analytics engine configuration.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Analytics engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Directory that exported reports are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// URL prefix under which exported files are served.
    #[serde(default = "default_export_url_prefix")]
    pub export_url_prefix: String,
    /// Alert threshold applied when a budget request omits one.
    #[serde(default = "default_alert_threshold")]
    pub default_alert_threshold: Decimal,
    /// Lookback used by automatic budget inference when none is given.
    #[serde(default = "default_inference_lookback_months")]
    pub inference_lookback_months: u32,
    /// Currency symbol used in notification messages.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_export_url_prefix() -> String {
    "uploads".to_string()
}

fn default_alert_threshold() -> Decimal {
    Decimal::from(80)
}

fn default_inference_lookback_months() -> u32 {
    6
}

fn default_currency_symbol() -> String {
    "KSH".to_string()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            export_url_prefix: default_export_url_prefix(),
            default_alert_threshold: default_alert_threshold(),
            inference_lookback_months: default_inference_lookback_months(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{RUN_MODE}.toml`, then `LEDGERWISE__*` environment variables
    /// (e.g. `LEDGERWISE__DATABASE__URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERWISE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
