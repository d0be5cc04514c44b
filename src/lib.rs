//! # marketplace-client
//!
//! Client library for the marketplace backend (shops, products, carts,
//! orders, reviews).
//!
//! ## Features
//!
//! - **Bearer authentication**: the stored access token rides on every request
//! - **Transparent refresh**: an "access token expired" answer triggers one
//!   token refresh and one retry of the request
//! - **Single-flight refresh**: optionally, concurrent requests share one refresh
//! - **Wildcard privileges**: `ALL` and `MANAGE` in `RESOURCE_ACTION` checks
//! - **Pluggable storage**: credentials in memory or in a JSON file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marketplace_client::{ApiClient, ConfigBuilder, Guard};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigBuilder::new()
//!         .base_url("https://shop.example.com")
//!         .file_storage("session.json")
//!         .try_build()?;
//!     let client = ApiClient::from_config(config)?;
//!
//!     client.login("alice", "secret", true).await?;
//!     client.guard(&Guard::any(["ORDER_READ"]))?;
//!
//!     let orders: serde_json::Value = client.get("/api/orders").await?;
//!     println!("{orders}");
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod sdk;
pub mod utils;

// Re-export main types
pub use auth::{
    CredentialStore, Credentials, Guard, GuardMode, Identity, PermissionEvaluator, SessionContext,
    Separator, authorize,
};
pub use config::{ClientConfig, ConfigBuilder, RefreshMode};
pub use sdk::{ApiClient, ApiRequest, ClientError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
