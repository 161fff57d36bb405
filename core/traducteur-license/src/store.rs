//! Expiry-aware persistence of the activation record.

use crate::error::{LicenseError, LicenseResult};
use crate::record::ActivationRecord;
use crate::storage::{MemorySecureStorage, SecureStorage};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Secure-storage entry holding the activation record.
pub const ACTIVATION_KEY: &str = "traducteur_activation";

/// Owns the single persisted [`ActivationRecord`].
///
/// Every operation runs under one mutex, so the read-then-clear performed by
/// [`get`](Self::get) on an expired record cannot interleave with a
/// concurrent [`store`](Self::store).
pub struct ActivationStore {
    storage: Arc<dyn SecureStorage>,
    lock: Mutex<()>,
}

impl ActivationStore {
    pub fn new(storage: Arc<dyn SecureStorage>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    /// A store backed by [`MemorySecureStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySecureStorage::new()))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persists `record`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Persistence`] if the backend write fails; the
    /// record must then be assumed unsaved.
    pub fn store(&self, record: &ActivationRecord) -> LicenseResult<()> {
        let _guard = self.guard();
        info!("Storing activation for user {}", record.user_id);

        let json = serde_json::to_string(record)
            .map_err(|e| LicenseError::Persistence(e.to_string()))?;
        self.storage
            .set_item(ACTIVATION_KEY, &json)
            .map_err(|e| match e {
                LicenseError::Persistence(_) => e,
                other => LicenseError::Persistence(other.to_string()),
            })
    }

    /// Returns the current record if one exists and has not expired.
    ///
    /// Reading an expired record deletes it. Unreadable or corrupt payloads
    /// are logged and reported as absent without being deleted.
    pub fn get(&self) -> Option<ActivationRecord> {
        self.get_at(Utc::now())
    }

    /// [`get`](Self::get) evaluated at `now`.
    pub fn get_at(&self, now: DateTime<Utc>) -> Option<ActivationRecord> {
        let _guard = self.guard();

        let raw = match self.storage.get_item(ACTIVATION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read activation: {}", e);
                return None;
            }
        };

        let record: ActivationRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("{}", LicenseError::CorruptRecord(e.to_string()));
                return None;
            }
        };

        if record.is_expired_at(now) {
            info!(
                "Activation for user {} expired at {}, clearing",
                record.user_id, record.expires_at
            );
            self.delete_logged();
            return None;
        }

        Some(record)
    }

    /// Deletes the record. Clearing an absent record is a no-op and backend
    /// failures are logged, never returned.
    pub fn clear(&self) {
        let _guard = self.guard();
        self.delete_logged();
    }

    /// Returns true if a valid record exists. Same side effects as
    /// [`get`](Self::get).
    pub fn is_activated(&self) -> bool {
        self.get().is_some()
    }

    fn delete_logged(&self) {
        match self.storage.delete_item(ACTIVATION_KEY) {
            Ok(()) => debug!("Activation cleared"),
            Err(e) => warn!("Failed to clear activation: {}", e),
        }
    }
}

impl std::fmt::Debug for ActivationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationStore").finish_non_exhaustive()
    }
}
