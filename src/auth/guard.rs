//! Route guards

use super::rbac::PermissionEvaluator;
use super::session::SessionContext;
use crate::sdk::errors::{ClientError, Result};
use tracing::debug;

/// How the required permissions combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    /// Any one required permission suffices
    Any,
    /// Every required permission must be held
    All,
}

/// Access requirement attached to a route or action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    required: Vec<String>,
    mode: GuardMode,
}

impl Guard {
    /// Open to everyone, signed in or not
    pub fn public() -> Self {
        Self {
            required: Vec::new(),
            mode: GuardMode::Any,
        }
    }

    pub fn any<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            mode: GuardMode::Any,
        }
    }

    pub fn all<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            mode: GuardMode::All,
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn mode(&self) -> GuardMode {
        self.mode
    }

    /// Admit or reject the current session
    pub fn check(&self, session: &SessionContext, evaluator: &PermissionEvaluator) -> Result<()> {
        if self.required.is_empty() {
            return Ok(());
        }

        if !session.is_authenticated() {
            return Err(ClientError::Unauthorized("sign in required".to_string()));
        }

        let granted = session.privileges();
        let allowed = match self.mode {
            GuardMode::Any => evaluator.authorize(&self.required, &granted),
            GuardMode::All => evaluator.authorize_all(&self.required, &granted),
        };

        if allowed {
            Ok(())
        } else {
            debug!(required = ?self.required, "guard rejected session");
            Err(ClientError::Forbidden(format!(
                "requires {} of [{}]",
                match self.mode {
                    GuardMode::Any => "one",
                    GuardMode::All => "all",
                },
                self.required.join(", ")
            )))
        }
    }
}
