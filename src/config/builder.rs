//! Configuration builder

use super::ClientConfig;
use super::models::*;
use crate::auth::rbac::Separator;
use crate::sdk::errors::Result;
use std::path::PathBuf;

/// Fluent builder for `ClientConfig`
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.api.base_url = url.into();
        self
    }

    /// Per-request timeout in seconds
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.config.api.timeout = timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.api.user_agent = Some(user_agent.into());
        self
    }

    pub fn refresh_mode(mut self, mode: RefreshMode) -> Self {
        self.config.auth.refresh_mode = mode;
        self
    }

    pub fn expired_token_code(mut self, code: i64) -> Self {
        self.config.auth.expired_token_code = code;
        self
    }

    pub fn permission_separator(mut self, separator: Separator) -> Self {
        self.config.auth.permission_separator = separator;
        self
    }

    pub fn endpoints(mut self, endpoints: EndpointsConfig) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Persist credentials to a JSON file
    pub fn file_storage<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.storage = StorageConfig {
            backend: StorageBackend::File,
            path: Some(path.into()),
        };
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Configuration, unvalidated
    pub fn build(self) -> ClientConfig {
        self.config
    }

    /// Configuration, validated
    pub fn try_build(self) -> Result<ClientConfig> {
        self.config.check()?;
        Ok(self.config)
    }
}
