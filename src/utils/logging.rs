//! Logging setup
//!
//! Installs a `tracing_subscriber` fmt subscriber. `RUST_LOG` takes
//! precedence over the configured level.

use crate::config::LoggingConfig;
use crate::sdk::errors::{ClientError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` if set and valid, else the configured level
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| ClientError::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| ClientError::Config(format!("Failed to initialize logging: {}", e)))
}
