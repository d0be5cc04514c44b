//! Persisted credential storage
//!
//! Credentials live in a flat string key/value store under the keys
//! `access_token`, `refresh_token` and `remember_me` (`"true"`/`"false"`).

use crate::sdk::errors::{ClientError, Result};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const REMEMBER_ME_KEY: &str = "remember_me";

/// String key/value store backing the credential store
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local storage, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // None until first access
    entries: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                ClientError::storage(format!(
                    "Failed to parse {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ClientError::storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ClientError::storage(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content).map_err(|e| {
            ClientError::storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        trace!(path = %self.path.display(), "storage persisted");
        Ok(())
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> (T, bool),
    ) -> Result<T> {
        let mut guard = self.entries.lock();
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        let mut entries = guard.clone().unwrap_or_default();
        let (value, dirty) = f(&mut entries);
        if dirty {
            // cache only moves once the file agrees
            self.persist(&entries)?;
            *guard = Some(entries);
        }
        Ok(value)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| (entries.get(key).cloned(), false))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            let changed = entries.get(key).map(String::as_str) != Some(value);
            entries.insert(key.to_string(), value.to_string());
            ((), changed)
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| ((), entries.remove(key).is_some()))
    }
}

/// Access/refresh token pair plus the remember-me flag
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    pub remember_me: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Typed view of the credential keys in a `KeyValueStorage`
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        Ok(self.storage.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.storage.get(REFRESH_TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// Anything other than the literal `"true"` reads as false
    pub fn remember_me(&self) -> Result<bool> {
        Ok(self.storage.get(REMEMBER_ME_KEY)?.as_deref() == Some("true"))
    }

    /// Both tokens, if both are stored
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        let (Some(access_token), Some(refresh_token)) =
            (self.access_token()?, self.refresh_token()?)
        else {
            return Ok(None);
        };

        Ok(Some(Credentials {
            access_token,
            refresh_token,
            remember_me: self.remember_me()?,
        }))
    }

    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        self.storage.set(ACCESS_TOKEN_KEY, &credentials.access_token)?;
        self.storage.set(REFRESH_TOKEN_KEY, &credentials.refresh_token)?;
        self.storage.set(
            REMEMBER_ME_KEY,
            if credentials.remember_me { "true" } else { "false" },
        )?;
        debug!(remember_me = credentials.remember_me, "credentials saved");
        Ok(())
    }

    pub fn set_access_token(&self, token: &str) -> Result<()> {
        self.storage.set(ACCESS_TOKEN_KEY, token)
    }

    pub fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.storage.set(REFRESH_TOKEN_KEY, token)
    }

    /// Forget both tokens and the remember-me flag
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(ACCESS_TOKEN_KEY)?;
        self.storage.remove(REFRESH_TOKEN_KEY)?;
        self.storage.remove(REMEMBER_ME_KEY)?;
        debug!("credentials cleared");
        Ok(())
    }
}
