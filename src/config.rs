//! Application configuration loaded from environment variables.
//!
//! A `.env` file is read first when present, so local development does not
//! need exported variables.

use std::env;

use crate::services::cache::{CacheConfig, DEFAULT_KEY_PREFIX, DEFAULT_MAX_ENTRIES};

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the activity API (no trailing slash needed)
    pub activity_api_base_url: String,
    /// Bearer token for the activity API; `None` means not logged in
    pub activity_api_token: Option<String>,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    // --- Cache ---
    /// Prefix for month keys in the store
    pub cache_key_prefix: String,
    /// Maximum number of cached months
    pub cache_max_entries: usize,
    /// Age after which a cached month is refetched
    pub cache_ttl_days: i64,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            activity_api_base_url: "http://localhost:9999/api".to_string(),
            activity_api_token: Some("test_token".to_string()),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            cache_key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            cache_ttl_days: 30,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            activity_api_base_url: env::var("ACTIVITY_API_BASE_URL")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("ACTIVITY_API_BASE_URL"))?,
            activity_api_token: env::var("ACTIVITY_API_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cache_key_prefix: env::var("CACHE_KEY_PREFIX")
                .unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string()),
            cache_max_entries: parse_positive("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES as i64)?
                as usize,
            cache_ttl_days: parse_ttl_days()?,
        })
    }

    /// Cache settings derived from this config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            key_prefix: self.cache_key_prefix.clone(),
            ttl: chrono::Duration::days(self.cache_ttl_days),
            max_entries: self.cache_max_entries,
        }
    }
}

/// Read a positive integer variable, falling back to `default` when unset.
fn parse_positive(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::Invalid(name, raw)),
        },
    }
}

/// `CACHE_TTL_DAYS`, bounded so it converts to a `chrono::Duration`.
fn parse_ttl_days() -> Result<i64, ConfigError> {
    let days = parse_positive("CACHE_TTL_DAYS", 30)?;
    match chrono::Duration::try_days(days) {
        Some(_) => Ok(days),
        None => Err(ConfigError::Invalid("CACHE_TTL_DAYS", days.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
