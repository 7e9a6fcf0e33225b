//! Persisted API-key credential shared by the pipeline and the route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! One namespaced durable slot holds the opaque key. Absence means the
//! browser is unauthenticated. Storage failures never propagate: reads
//! degrade to `None` and writes are logged and dropped.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// `localStorage` key holding the credential.
pub const CREDENTIAL_STORAGE_KEY: &str = "bayesianqc_api_key";

/// Durable string key-value slot backing the credential store.
pub trait CredentialStorage: Send + Sync {
    /// Read `key`, or `None` when absent or when storage is unavailable.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write `key`.
    ///
    /// # Errors
    ///
    /// Returns a description of the storage failure.
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// Returns a description of the storage failure.
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// In-process storage used for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|e| e.to_string())?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|e| e.to_string())?;
        items.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`, looked up on every call.
///
/// Outside the browser (`csr`) build every read is `None` and every write
/// fails, which the store treats as "unauthenticated".
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl CredentialStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_owned())?;
            storage.set_item(key, value).map_err(|e| format!("{e:?}"))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err("localStorage unavailable".to_owned())
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_owned())?;
            storage.remove_item(key).map_err(|e| format!("{e:?}"))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err("localStorage unavailable".to_owned())
        }
    }
}

/// Single-slot credential store over a [`CredentialStorage`] adapter.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn CredentialStorage>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl CredentialStore {
    #[must_use]
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self { storage }
    }

    /// Store backed by a fresh [`MemoryStorage`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Current credential, if any. An empty stored value counts as absent.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.storage
            .get_item(CREDENTIAL_STORAGE_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Replace the stored credential. The token is not inspected.
    pub fn set(&self, token: &str) {
        if let Err(e) = self.storage.set_item(CREDENTIAL_STORAGE_KEY, token) {
            log::warn!("credential write failed: {e}");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(CREDENTIAL_STORAGE_KEY) {
            log::warn!("credential clear failed: {e}");
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
