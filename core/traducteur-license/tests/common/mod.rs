//! Shared fakes for activation store tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use traducteur_license::{
    ActivationRecord, LicenseError, LicenseResult, MemorySecureStorage, SecureStorage,
};

/// Memory storage that counts writes and deletes.
#[derive(Default)]
pub struct CountingStorage {
    pub inner: MemorySecureStorage,
    pub writes: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl CountingStorage {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl SecureStorage for CountingStorage {
    fn get_item(&self, name: &str) -> LicenseResult<Option<String>> {
        self.inner.get_item(name)
    }

    fn set_item(&self, name: &str, value: &str) -> LicenseResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_item(name, value)
    }

    fn delete_item(&self, name: &str) -> LicenseResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_item(name)
    }
}

/// Storage whose every operation fails.
pub struct FailingStorage;

impl SecureStorage for FailingStorage {
    fn get_item(&self, _name: &str) -> LicenseResult<Option<String>> {
        Err(LicenseError::Storage("keychain locked".into()))
    }

    fn set_item(&self, _name: &str, _value: &str) -> LicenseResult<()> {
        Err(LicenseError::Storage("disk full".into()))
    }

    fn delete_item(&self, _name: &str) -> LicenseResult<()> {
        Err(LicenseError::Storage("keychain locked".into()))
    }
}

/// Truncates to whole seconds so records compare equal after a JSON trip.
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap()
}

pub fn record_expiring_in(delta: Duration) -> ActivationRecord {
    let now = now();
    ActivationRecord::new("u1", now - Duration::days(1), now + delta)
}
