//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ## Environment
//!
//! | Variable | Default | Purpose |
//! |---|---|---|
//! | `SANITY_PROJECT_ID` | required | Content backend project |
//! | `SANITY_DATASET` | `production` | Content backend dataset |
//! | `SANITY_API_VERSION` | `2021-10-21` | Query API version (date) |
//! | `SANITY_USE_CDN` | `true` | Query the CDN host instead of the live API |
//! | `SANITY_TOKEN` | none | Read token for private datasets |
//! | `DROP_GATEWAY_URL` | required | Base URL of the contract-drop gateway |
//! | `DROP_CHAIN` | `goerli` | Chain the drops are deployed on |
//! | `DROP_ACCESS_TOKEN` | none | Bearer token for the gateway |
//! | `HTTP_TIMEOUT_SECS` | `10` | Timeout for every outbound request |
//! | `PAGE_IDLE_MINUTES` | `30` | Idle time before a mounted page or wallet session is evicted |
//! | `MAX_PAGES` | `10000` | Mounted pages kept at once (least recently seen evicted first) |
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::init_config;
//!
//! let config = init_config().expect("invalid configuration");
//! let dataset = &config.sanity_dataset;
//! ```

use crate::error::{AppError, Result};
use lib_utils::{get_env, get_env_opt, get_env_or, get_env_parse_or};
use std::sync::OnceLock;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub sanity_project_id: String,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub sanity_use_cdn: bool,
    pub sanity_token: Option<String>,

    pub drop_gateway_url: String,
    pub drop_chain: String,
    pub drop_access_token: Option<String>,

    /// Valid range: 1-120 seconds
    pub http_timeout_secs: u64,

    /// Valid range: 1-1440 minutes
    pub page_idle_minutes: u64,

    /// Valid range: 1-1000000
    pub max_pages: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            sanity_project_id: get_env("SANITY_PROJECT_ID")?,
            sanity_dataset: get_env_or("SANITY_DATASET", "production"),
            sanity_api_version: get_env_or("SANITY_API_VERSION", "2021-10-21"),
            sanity_use_cdn: get_env_parse_or("SANITY_USE_CDN", true)?,
            sanity_token: get_env_opt("SANITY_TOKEN"),
            drop_gateway_url: get_env("DROP_GATEWAY_URL")?,
            drop_chain: get_env_or("DROP_CHAIN", "goerli"),
            drop_access_token: get_env_opt("DROP_ACCESS_TOKEN"),
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 10)?,
            page_idle_minutes: get_env_parse_or("PAGE_IDLE_MINUTES", 30)?,
            max_pages: get_env_parse_or("MAX_PAGES", 10_000)?,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.sanity_project_id.trim().is_empty()
            || !self.sanity_project_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(AppError::Config(
                "SANITY_PROJECT_ID must be a non-empty alphanumeric id".to_string(),
            ));
        }

        if self.sanity_dataset.trim().is_empty() {
            return Err(AppError::Config("SANITY_DATASET cannot be empty".to_string()));
        }

        if !self.drop_gateway_url.starts_with("http://") && !self.drop_gateway_url.starts_with("https://") {
            return Err(AppError::Config(
                "DROP_GATEWAY_URL must be an http(s) URL".to_string(),
            ));
        }

        if self.http_timeout_secs < 1 || self.http_timeout_secs > 120 {
            return Err(AppError::Config(
                "HTTP_TIMEOUT_SECS must be between 1 and 120".to_string(),
            ));
        }

        if self.page_idle_minutes < 1 || self.page_idle_minutes > 1440 {
            return Err(AppError::Config(
                "PAGE_IDLE_MINUTES must be between 1 and 1440 (one day)".to_string(),
            ));
        }

        if self.max_pages < 1 || self.max_pages > 1_000_000 {
            return Err(AppError::Config(
                "MAX_PAGES must be between 1 and 1000000".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("sanity_project_id", &self.sanity_project_id)
            .field("sanity_dataset", &self.sanity_dataset)
            .field("sanity_api_version", &self.sanity_api_version)
            .field("sanity_use_cdn", &self.sanity_use_cdn)
            .field("sanity_token", &self.sanity_token.as_ref().map(|_| "***REDACTED***"))
            .field("drop_gateway_url", &self.drop_gateway_url)
            .field("drop_chain", &self.drop_chain)
            .field("drop_access_token", &self.drop_access_token.as_ref().map(|_| "***REDACTED***"))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("page_idle_minutes", &self.page_idle_minutes)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration from the environment.
///
/// # Errors
///
/// Returns an error if variables are missing or invalid, validation fails, or
/// the config has already been initialized.
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;

    CONFIG
        .get()
        .ok_or_else(|| AppError::Config("Config was not stored".to_string()))
}
