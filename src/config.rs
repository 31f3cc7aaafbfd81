// Configuration management

use crate::core::errors::PermissionError;
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration loaded from environment variables
///
/// All values are optional in the environment and validated on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    // Member cache configuration
    pub member_cache_ttl_secs: u64,
    pub member_cache_max_capacity: u64,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Default for Config {
    fn default() -> Self {
        Self {
            member_cache_ttl_secs: 120,
            member_cache_max_capacity: 10_000,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    ///
    /// # Returns
    /// * `Result<Self, PermissionError>` - Config instance or validation error
    pub fn from_env() -> Result<Self, PermissionError> {
        // Skipped under test so a stray .env cannot leak into assertions
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok();
        }

        let defaults = Self::default();
        let config = Self {
            member_cache_ttl_secs: Self::parse_u64_or_default(
                "MEMBER_CACHE_TTL_SECS",
                defaults.member_cache_ttl_secs,
            )?,
            member_cache_max_capacity: Self::parse_u64_or_default(
                "MEMBER_CACHE_MAX_CAPACITY",
                defaults.member_cache_max_capacity,
            )?,
            log_level: Self::get_env_or_default("LOG_LEVEL", &defaults.log_level),
            log_format: Self::get_env_or_default("LOG_FORMAT", &defaults.log_format),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get environment variable or return default value
    fn get_env_or_default(key: &str, default: &str) -> String {
        match env::var(key) {
            Ok(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }

    /// Parse u64 from environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, PermissionError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    PermissionError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(PermissionError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), PermissionError> {
        if self.member_cache_ttl_secs == 0 {
            return Err(PermissionError::ConfigurationError(
                "MEMBER_CACHE_TTL_SECS must be greater than 0".to_string(),
            ));
        }
        if self.member_cache_max_capacity == 0 {
            return Err(PermissionError::ConfigurationError(
                "MEMBER_CACHE_MAX_CAPACITY must be greater than 0".to_string(),
            ));
        }

        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;

        Ok(())
    }

    fn validate_log_level(level: &str) -> Result<(), PermissionError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(PermissionError::ConfigurationError(format!(
                "Invalid LOG_LEVEL '{}': must be one of {:?}",
                level, valid_levels
            )));
        }
        Ok(())
    }

    fn validate_log_format(format: &str) -> Result<(), PermissionError> {
        match format.to_lowercase().as_str() {
            "json" | "text" => Ok(()),
            _ => Err(PermissionError::ConfigurationError(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            ))),
        }
    }
}
