//! Permission checking methods

use super::types::{Permission, PermissionCheck, Separator};
use tracing::trace;

/// Decides whether a set of granted permissions satisfies a requirement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionEvaluator {
    separator: Separator,
}

impl PermissionEvaluator {
    /// Create an evaluator using the given separator policy
    pub fn new(separator: Separator) -> Self {
        Self { separator }
    }

    /// Separator policy in use
    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// Whether one granted permission satisfies one required permission
    pub fn matches(&self, required: &str, granted: &str) -> bool {
        if required == granted {
            return true;
        }

        match (
            Permission::parse(required, self.separator),
            Permission::parse(granted, self.separator),
        ) {
            (Some(required), Some(granted)) => granted.covers(&required),
            _ => false,
        }
    }

    /// True if any required permission is satisfied by any granted one.
    /// An empty requirement is always satisfied.
    pub fn authorize<R, G>(&self, required: &[R], granted: &[G]) -> bool
    where
        R: AsRef<str>,
        G: AsRef<str>,
    {
        if required.is_empty() {
            return true;
        }

        required
            .iter()
            .any(|r| self.is_satisfied(r.as_ref(), granted))
    }

    /// True if every required permission is satisfied by some granted one
    pub fn authorize_all<R, G>(&self, required: &[R], granted: &[G]) -> bool
    where
        R: AsRef<str>,
        G: AsRef<str>,
    {
        required
            .iter()
            .all(|r| self.is_satisfied(r.as_ref(), granted))
    }

    /// Detailed permission check
    pub fn check<R, G>(&self, required: &[R], granted: &[G]) -> PermissionCheck
    where
        R: AsRef<str>,
        G: AsRef<str>,
    {
        if required.is_empty() {
            return PermissionCheck::allowed(None);
        }

        for r in required {
            if let Some(g) = granted.iter().find(|g| self.matches(r.as_ref(), g.as_ref())) {
                trace!(required = r.as_ref(), granted = g.as_ref(), "permission matched");
                return PermissionCheck::allowed(Some((
                    r.as_ref().to_string(),
                    g.as_ref().to_string(),
                )));
            }
        }

        let wanted: Vec<&str> = required.iter().map(|r| r.as_ref()).collect();
        PermissionCheck::denied(format!("Missing permission: one of [{}]", wanted.join(", ")))
    }

    fn is_satisfied<G: AsRef<str>>(&self, required: &str, granted: &[G]) -> bool {
        granted.iter().any(|g| self.matches(required, g.as_ref()))
    }
}

/// Check `required` against `granted` with the default separator policy
pub fn authorize<R, G>(required: &[R], granted: &[G]) -> bool
where
    R: AsRef<str>,
    G: AsRef<str>,
{
    PermissionEvaluator::default().authorize(required, granted)
}
