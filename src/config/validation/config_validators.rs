//! Configuration section validators

use super::trait_def::Validate;
use crate::config::ClientConfig;
use crate::config::models::*;
use tracing::debug;
use url::Url;

/// Upper bound on the per-request timeout, in seconds
const MAX_TIMEOUT_SECS: u64 = 300;

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating client configuration");

        self.api.validate()?;
        self.auth.validate()?;
        self.endpoints.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL '{}': {}", self.base_url, e))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if url.host_str().is_none() {
            return Err("Base URL must include a host".to_string());
        }

        if self.timeout == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.timeout > MAX_TIMEOUT_SECS {
            return Err(format!(
                "Timeout should not exceed {} seconds",
                MAX_TIMEOUT_SECS
            ));
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.expired_token_code <= 0 {
            return Err("Expired token code must be positive".to_string());
        }
        Ok(())
    }
}

impl Validate for EndpointsConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, path) in self.iter() {
            if !path.starts_with('/') {
                return Err(format!(
                    "Endpoint '{}' must be an absolute path, got '{}'",
                    name, path
                ));
            }
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackend::File && self.path.is_none() {
            return Err("File storage requires a path".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
