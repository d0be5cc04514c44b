//! Configuration data models
//!
//! This module defines the configuration sections of the client.

#![allow(missing_docs)]

pub mod api;
pub mod auth;
pub mod endpoints;
pub mod logging;
pub mod storage;

// Re-export all configuration types
pub use api::*;
pub use auth::*;
pub use endpoints::*;
pub use logging::*;
pub use storage::*;

/// Default backend base URL
pub fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

/// Default per-request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Application error code the backend uses for an expired access token
pub fn default_expired_token_code() -> i64 {
    403002
}

pub fn default_true() -> bool {
    true
}
