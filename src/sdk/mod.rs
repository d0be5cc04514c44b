//! Marketplace backend SDK
//!
//! The authenticated API client, its wire schemas and its error type.

pub mod client;
pub mod errors;
pub mod types;

// Re-exports for convenience
pub use client::ApiClient;
pub use errors::{ClientError, Result};
pub use types::*;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
