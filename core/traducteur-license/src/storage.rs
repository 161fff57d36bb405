//! Secure storage abstraction.
//!
//! A minimal string key/value interface in the shape of a platform keychain.
//! The activation store depends on `Arc<dyn SecureStorage>` and never names a
//! concrete backend.

use crate::error::LicenseResult;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Key/value backend for small secrets.
pub trait SecureStorage: Send + Sync {
    /// Reads an entry. A missing entry is `Ok(None)`, not an error.
    fn get_item(&self, name: &str) -> LicenseResult<Option<String>>;

    /// Writes an entry, replacing any previous value.
    fn set_item(&self, name: &str, value: &str) -> LicenseResult<()>;

    /// Deletes an entry. Deleting a missing entry succeeds.
    fn delete_item(&self, name: &str) -> LicenseResult<()>;
}

/// In-process storage. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemorySecureStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySecureStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an entry exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecureStorage for MemorySecureStorage {
    fn get_item(&self, name: &str) -> LicenseResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(name).cloned())
    }

    fn set_item(&self, name: &str, value: &str) -> LicenseResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete_item(&self, name: &str) -> LicenseResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(name);
        Ok(())
    }
}
