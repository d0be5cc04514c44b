//! Client configuration
//!
//! Configuration is read from a YAML file, then selectively overridden from
//! `MARKETPLACE_*` environment variables, then validated.

pub mod builder;
pub mod models;
pub mod validation;

pub use builder::ConfigBuilder;
pub use models::*;
pub use validation::Validate;

use crate::auth::rbac::PermissionEvaluator;
use crate::auth::storage::{CredentialStore, FileStorage, MemoryStorage};
use crate::sdk::errors::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable overriding `api.base_url`
pub const ENV_API_URL: &str = "MARKETPLACE_API_URL";
/// Environment variable overriding `api.timeout`
pub const ENV_TIMEOUT: &str = "MARKETPLACE_TIMEOUT";
/// Environment variable overriding `auth.refresh_mode`
pub const ENV_REFRESH_MODE: &str = "MARKETPLACE_REFRESH_MODE";
/// Environment variable selecting file storage at the given path
pub const ENV_STORAGE_PATH: &str = "MARKETPLACE_STORAGE_PATH";
/// Environment variable overriding `logging.level`
pub const ENV_LOG_LEVEL: &str = "MARKETPLACE_LOG_LEVEL";

/// Main configuration struct for the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClientError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate YAML configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ClientError::Config(format!("Failed to parse config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.check()?;
        Ok(config)
    }

    /// Apply `MARKETPLACE_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.api.timeout = timeout
                .parse()
                .map_err(|e| ClientError::Config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(mode) = lookup(ENV_REFRESH_MODE) {
            self.auth.refresh_mode = mode.parse().map_err(ClientError::Config)?;
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            self.storage.backend = StorageBackend::File;
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate the entire configuration
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(ClientError::Config)
    }

    /// Credential store for the configured backend
    pub fn open_storage(&self) -> Result<CredentialStore> {
        match (self.storage.backend, &self.storage.path) {
            (StorageBackend::Memory, _) => Ok(CredentialStore::new(Arc::new(MemoryStorage::new()))),
            (StorageBackend::File, Some(path)) => {
                debug!(path = %path.display(), "using file credential storage");
                Ok(CredentialStore::new(Arc::new(FileStorage::new(path))))
            }
            (StorageBackend::File, None) => Err(ClientError::Config(
                "File storage requires a path".to_string(),
            )),
        }
    }

    /// Permission evaluator for the configured separator policy
    pub fn evaluator(&self) -> PermissionEvaluator {
        PermissionEvaluator::new(self.auth.permission_separator)
    }
}
