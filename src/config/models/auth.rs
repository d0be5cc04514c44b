//! Authentication configuration

use super::*;
use crate::auth::rbac::Separator;
use serde::{Deserialize, Serialize};

/// How concurrent token refreshes are coordinated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    /// Every request that sees an expired token refreshes on its own
    #[default]
    PerRequest,
    /// Concurrent requests share one in-flight refresh
    SingleFlight,
}

impl std::str::FromStr for RefreshMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "per_request" => Ok(RefreshMode::PerRequest),
            "single_flight" => Ok(RefreshMode::SingleFlight),
            other => Err(format!("unknown refresh mode: {}", other)),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Refresh coordination
    #[serde(default)]
    pub refresh_mode: RefreshMode,
    /// Error code signalling an expired access token
    #[serde(default = "default_expired_token_code")]
    pub expired_token_code: i64,
    /// Separator policy for permission strings
    #[serde(default)]
    pub permission_separator: Separator,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_mode: RefreshMode::default(),
            expired_token_code: default_expired_token_code(),
            permission_separator: Separator::default(),
        }
    }
}
