//! Durable client-side persistence of the current identity
//!
//! One serialized `Identity` lives under a fixed key. Reads never fail:
//! a missing key means "nobody is signed in", and an unreadable value is
//! treated as corruption, cleared and reported as "nobody is signed in".

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use leptos::logging;

use super::error::{AuthError, StorageError};
use super::identity::Identity;

/// Storage key holding the serialized identity
pub const SESSION_STORAGE_KEY: &str = "civic_console_session";

/// Minimal key-value storage the session store writes through
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Operation(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Operation(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Operation(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// `window.localStorage`, looked up on every call
///
/// In the server build there is no browser storage: reads see nothing and
/// writes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(not(feature = "ssr"))]
impl BrowserStorage {
    fn local_storage() -> Result<leptos::web_sys::Storage, StorageError> {
        let window = leptos::web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(not(feature = "ssr"))]
impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }
}

#[cfg(feature = "ssr")]
impl StorageBackend for BrowserStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Persistence for exactly one identity
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    key: &'static str,
}

impl<S: StorageBackend> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: SESSION_STORAGE_KEY,
        }
    }

    /// Write the identity, replacing whatever was stored.
    ///
    /// Failures are logged and otherwise ignored; the session then lives in
    /// memory only.
    pub fn save(&self, identity: &Identity) {
        let json = match serde_json::to_string(identity) {
            Ok(json) => json,
            Err(e) => {
                logging::warn!("Failed to serialize session: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(self.key, &json) {
            logging::warn!("Failed to persist session, continuing in memory: {}", e);
        }
    }

    /// Read the stored identity, self-healing on corruption
    pub fn load(&self) -> Option<Identity> {
        let raw = match self.storage.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                logging::warn!("Failed to read session storage: {}", e);
                return None;
            }
        };

        match parse_identity(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                logging::warn!("{}, clearing it", e);
                self.clear();
                None
            }
        }
    }

    /// Remove the stored identity. Clearing an empty store is fine.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(self.key) {
            logging::warn!("Failed to clear session storage: {}", e);
        }
    }
}

fn parse_identity(raw: &str) -> Result<Identity, AuthError> {
    let identity: Identity =
        serde_json::from_str(raw).map_err(|_| AuthError::CorruptSession)?;
    if identity.is_well_formed() {
        Ok(identity)
    } else {
        Err(AuthError::CorruptSession)
    }
}
