//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MARKET_DATA_PATH` - redb database file (default: laptop-market.redb)
//! - `MARKET_ADMIN_USERNAME` - Accepted sign-in username (default: admin)
//! - `MARKET_ADMIN_PASSWORD` - Accepted sign-in password (default: admin123)
//! - `MARKET_VIEW_CACHE_CAPACITY` - Maximum memoized catalog views (default: 256)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::services::auth::{Credentials, DEFAULT_PASSWORD, DEFAULT_USERNAME};

const DEFAULT_DATA_PATH: &str = "laptop-market.redb";
const DEFAULT_VIEW_CACHE_CAPACITY: u64 = 256;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Path of the durable key-value store
    pub data_path: PathBuf,
    /// Credentials accepted by the session gate
    pub admin: Credentials,
    /// Maximum number of memoized catalog views
    pub view_cache_capacity: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            admin: Credentials::default(),
            view_cache_capacity: DEFAULT_VIEW_CACHE_CAPACITY,
        }
    }
}

impl MarketConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("MARKET_DATA_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);

        let username =
            lookup("MARKET_ADMIN_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = SecretString::from(
            lookup("MARKET_ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        );

        let view_cache_capacity = match lookup("MARKET_VIEW_CACHE_CAPACITY") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("MARKET_VIEW_CACHE_CAPACITY".to_string(), e.to_string())
            })?,
            None => DEFAULT_VIEW_CACHE_CAPACITY,
        };

        let config = Self {
            data_path,
            admin: Credentials::new(username, password),
            view_cache_capacity,
        };

        if config.uses_default_password() {
            tracing::warn!("MARKET_ADMIN_PASSWORD not set, using the built-in default password");
        }

        Ok(config)
    }

    /// Whether the sign-in password is still the built-in default.
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.admin.password.expose_secret() == DEFAULT_PASSWORD
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MarketConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("laptop-market.redb"));
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.view_cache_capacity, 256);
        assert!(config.uses_default_password());
    }

    #[test]
    fn test_overrides() {
        let config = MarketConfig::from_lookup(lookup_from(&[
            ("MARKET_DATA_PATH", "/tmp/market.redb"),
            ("MARKET_ADMIN_USERNAME", "seller"),
            ("MARKET_ADMIN_PASSWORD", "aB3$xY9!mK2@nL5#"),
            ("MARKET_VIEW_CACHE_CAPACITY", "8"),
        ]))
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/tmp/market.redb"));
        assert_eq!(config.admin.username, "seller");
        assert_eq!(config.view_cache_capacity, 8);
        assert!(!config.uses_default_password());
    }

    #[test]
    fn test_invalid_capacity() {
        let result =
            MarketConfig::from_lookup(lookup_from(&[("MARKET_VIEW_CACHE_CAPACITY", "lots")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = MarketConfig::from_lookup(lookup_from(&[(
            "MARKET_ADMIN_PASSWORD",
            "super_secret_password",
        )]))
        .unwrap();

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }
}
