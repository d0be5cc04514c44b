//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wildcard resource: matches every resource
pub const WILDCARD_RESOURCE: &str = "ALL";

/// Wildcard action: matches every action on a resource
pub const WILDCARD_ACTION: &str = "MANAGE";

/// Separator between the resource and action halves of a permission string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    /// `RESOURCE:ACTION`, split at the first colon
    Colon,
    /// `RESOURCE_ACTION`, split at the last underscore
    Underscore,
    /// Colon when present, underscore otherwise
    #[default]
    Either,
}

/// A permission string split into resource and action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permission<'a> {
    /// Resource name, or `ALL`
    pub resource: &'a str,
    /// Action name, or `MANAGE`
    pub action: &'a str,
}

impl<'a> Permission<'a> {
    /// Parse a permission string. Returns `None` for malformed input.
    pub fn parse(value: &'a str, separator: Separator) -> Option<Self> {
        let (resource, action) = match separator {
            Separator::Colon => value.split_once(':')?,
            Separator::Underscore => value.rsplit_once('_')?,
            Separator::Either => value
                .split_once(':')
                .or_else(|| value.rsplit_once('_'))?,
        };

        if resource.is_empty() || action.is_empty() {
            return None;
        }

        Some(Self { resource, action })
    }

    /// Whether this granted permission covers `required`
    pub fn covers(&self, required: &Permission<'_>) -> bool {
        let any_resource = self.resource == WILDCARD_RESOURCE;
        let any_action = self.action == WILDCARD_ACTION;

        (any_resource || self.resource == required.resource)
            && (any_action || self.action == required.action)
    }
}

impl fmt::Display for Permission<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

/// Permission check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// The (required, granted) pair that allowed access
    pub matched: Option<(String, String)>,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}

impl PermissionCheck {
    pub(crate) fn allowed(matched: Option<(String, String)>) -> Self {
        Self {
            granted: true,
            matched,
            denial_reason: None,
        }
    }

    pub(crate) fn denied(reason: String) -> Self {
        Self {
            granted: false,
            matched: None,
            denial_reason: Some(reason),
        }
    }
}
