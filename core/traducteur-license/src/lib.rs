//! Activation persistence for Traducteur.
//!
//! This crate owns the single locally persisted [`ActivationRecord`]:
//! - [`ActivationStore`] decides validity by comparing `expires_at` with the
//!   current time and lazily deletes expired records on read
//! - [`SecureStorage`] is the injectable backend; [`FileSecureStorage`] seals
//!   values with a device-bound key, [`MemorySecureStorage`] is for tests and
//!   ephemeral sessions
//!
//! # Read contract
//!
//! [`ActivationStore::get`] is not read-only: reading an expired record
//! deletes it. A corrupt payload is logged and reported as absent.

mod device;
mod error;
mod file_storage;
mod record;
mod storage;
mod store;

pub use device::DeviceFingerprint;
pub use error::{LicenseError, LicenseResult};
pub use file_storage::FileSecureStorage;
pub use record::{ActivationRecord, DEFAULT_ACTIVATION_DAYS};
pub use storage::{MemorySecureStorage, SecureStorage};
pub use store::{ActivationStore, ACTIVATION_KEY};
