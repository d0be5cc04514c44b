//! Marketplace API client
//!
//! An authenticated HTTP client for the marketplace backend. Requests carry
//! the stored access token as a bearer token; when the backend answers with
//! the "access token expired" code the client refreshes the token once and
//! retries the request once.

mod account;
mod client;
mod refresh;
mod request;


// Re-export the main client
pub use client::ApiClient;
