//! In-memory session identity
//!
//! One `SessionContext` is shared (by clone) between the API client, which
//! fills and clears it, and whatever performs authorization checks.

use super::rbac::PermissionEvaluator;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// The authenticated user as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID
    pub id: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: Option<String>,
    /// Granted permission strings
    pub privileges: HashSet<String>,
}

/// Shared handle to the current session identity
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    identity: Arc<RwLock<Option<Identity>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the identity wholesale
    pub fn set_identity(&self, identity: Identity) {
        debug!(
            user = %identity.username,
            privileges = identity.privileges.len(),
            "session identity set"
        );
        *self.identity.write() = Some(identity);
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.read().clone()
    }

    /// Granted privileges; empty when nobody is signed in
    pub fn privileges(&self) -> Vec<String> {
        self.identity
            .read()
            .as_ref()
            .map(|identity| identity.privileges.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.read().is_some()
    }

    pub fn clear(&self) {
        if self.identity.write().take().is_some() {
            debug!("session identity cleared");
        }
    }

    /// Check `required` against the current identity's privileges
    pub fn authorize<R: AsRef<str>>(&self, evaluator: &PermissionEvaluator, required: &[R]) -> bool {
        evaluator.authorize(required, &self.privileges())
    }
}
