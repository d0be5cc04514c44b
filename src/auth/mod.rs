//! Authentication and authorization
//!
//! Credential persistence, the in-memory session identity, and the
//! privilege checks that route guards run against it.

pub mod guard;
pub mod rbac;
pub mod session;
pub mod storage;

pub use guard::{Guard, GuardMode};
pub use rbac::{Permission, PermissionCheck, PermissionEvaluator, Separator, authorize};
pub use session::{Identity, SessionContext};
pub use storage::{CredentialStore, Credentials, FileStorage, KeyValueStorage, MemoryStorage};
