//! Core API client implementation

use crate::auth::guard::Guard;
use crate::auth::rbac::PermissionEvaluator;
use crate::auth::session::SessionContext;
use crate::auth::storage::CredentialStore;
use crate::config::ClientConfig;
use crate::sdk::errors::*;
use futures::future::{BoxFuture, Shared};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// A refresh in progress, awaited by every request that needs it
pub(crate) type SharedRefresh =
    Shared<BoxFuture<'static, std::result::Result<String, Arc<ClientError>>>>;

/// Authenticated client for the marketplace backend
///
/// Cloning is cheap; clones share the HTTP connection pool, the credential
/// store, the session and any refresh in flight.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) http_client: reqwest::Client,
    pub(crate) credentials: CredentialStore,
    pub(crate) session: SessionContext,
    pub(crate) evaluator: PermissionEvaluator,
    pub(crate) inflight_refresh: Arc<Mutex<Option<SharedRefresh>>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.api.base_url)
            .field("refresh_mode", &self.config.auth.refresh_mode)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    /// Create a client over existing storage and session
    pub fn new(
        config: ClientConfig,
        credentials: CredentialStore,
        session: SessionContext,
    ) -> Result<Self> {
        config.check()?;

        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.api.timeout));
        if let Some(user_agent) = &config.api.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let http_client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.api.base_url,
            refresh_mode = ?config.auth.refresh_mode,
            "ApiClient created"
        );

        Ok(Self {
            evaluator: config.evaluator(),
            config: Arc::new(config),
            http_client,
            credentials,
            session,
            inflight_refresh: Arc::new(Mutex::new(None)),
        })
    }

    /// Create a client with the storage the configuration names and a fresh session
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let credentials = config.open_storage()?;
        Self::new(config, credentials, SessionContext::new())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Check `required` against the signed-in identity
    pub fn authorize<R: AsRef<str>>(&self, required: &[R]) -> bool {
        self.session.authorize(&self.evaluator, required)
    }

    /// Run a route guard against the signed-in identity
    pub fn guard(&self, guard: &Guard) -> Result<()> {
        guard.check(&self.session, &self.evaluator)
    }
}
