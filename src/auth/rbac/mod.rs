//! Role-Based Access Control (RBAC)
//!
//! Privilege strings are `RESOURCE_ACTION` or `RESOURCE:ACTION` pairs. `ALL`
//! stands for every resource and `MANAGE` for every action on a resource.

mod permissions;
mod types;

// Re-export public types and structs
pub use permissions::{PermissionEvaluator, authorize};
pub use types::{Permission, PermissionCheck, Separator, WILDCARD_ACTION, WILDCARD_RESOURCE};
