//! Configuration for the HeartScope client.

use std::env;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable overriding the prediction service address.
pub const API_URL_ENV: &str = "HEARTSCOPE_API_URL";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote prediction service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-call timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (default: info)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_base_url() -> String {
    "https://heart-scope-backend.onrender.com".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. `HEARTSCOPE_API_URL` for the service address
    /// 2. Environment variables (HEARTSCOPE__SECTION__KEY format)
    /// 3. heartscope.toml file (if present)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("heartscope", env::var(API_URL_ENV).ok())
    }

    /// Load using an explicit config file stem and base URL override.
    pub fn load_from(file: &str, base_url_override: Option<String>) -> Result<Self, ConfigError> {
        let base_url_override = base_url_override.filter(|url| !url.trim().is_empty());

        let config = ConfigLoader::builder()
            .set_default("api.base_url", default_base_url())?
            .set_default("api.timeout_secs", default_timeout_secs() as i64)?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("HEARTSCOPE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", base_url_override)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        if config.api.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}
