//! Credential storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where credentials are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process memory only
    #[default]
    Memory,
    /// JSON file on disk
    File,
}

/// Credential storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Path of the JSON file for the file backend
    #[serde(default)]
    pub path: Option<PathBuf>,
}
