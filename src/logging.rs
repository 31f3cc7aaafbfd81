// Tracing subscriber setup

use crate::config::Config;
use crate::core::errors::PermissionError;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber from configuration
///
/// `RUST_LOG` takes precedence over `config.log_level`. Fails if the level
/// is invalid or a global subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<(), PermissionError> {
    let level = parse_log_level(&config.log_level)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_env_filter(filter);

    let installed = if config.log_format.eq_ignore_ascii_case("json") {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    installed.map_err(|e| {
        PermissionError::ConfigurationError(format!("Failed to install tracing subscriber: {}", e))
    })
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<tracing::Level, PermissionError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        _ => Err(PermissionError::ConfigurationError(format!(
            "Invalid log level: {}",
            level
        ))),
    }
}
