//! Error handling

use std::sync::Arc;
use thiserror::Error;

/// Error
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure before any response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Per-request timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-success response from the backend
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Application error code from the response body, if any
        code: Option<i64>,
        /// Message from the response body, or the raw body
        message: String,
    },

    /// No authenticated identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but lacking the required privileges
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Persisted credential storage
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failure of a refresh shared by several waiting requests
    #[error(transparent)]
    Shared(Arc<ClientError>),
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Application error code carried by an API error
    pub fn api_code(&self) -> Option<i64> {
        match self {
            ClientError::Api { code, .. } => *code,
            ClientError::Shared(inner) => inner.api_code(),
            _ => None,
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Shared(inner) => inner.status(),
            _ => None,
        }
    }

    /// Whether this is the backend's "access token expired" signal
    pub fn is_token_expired(&self, expired_code: i64) -> bool {
        self.api_code() == Some(expired_code)
    }

    /// Error
    pub fn is_auth_error(&self) -> bool {
        match self {
            ClientError::Unauthorized(_) | ClientError::Forbidden(_) => true,
            ClientError::Api { status, .. } => *status == 401 || *status == 403,
            ClientError::Shared(inner) => inner.is_auth_error(),
            _ => false,
        }
    }

    /// Error
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Timeout(_) => true,
            ClientError::Api { status, .. } => *status >= 500 || *status == 429,
            ClientError::Shared(inner) => inner.is_retryable(),
            _ => false,
        }
    }

    /// Configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, ClientError::Config(_))
    }

    pub(crate) fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub(crate) fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Classify a transport error the way callers care about
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ClientError::Timeout(error.to_string())
        } else if error.is_connect() || error.is_request() {
            ClientError::Network(error.to_string())
        } else {
            ClientError::Http(error)
        }
    }
}
