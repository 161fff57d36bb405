//! Error types for activation persistence.

use thiserror::Error;

/// Activation persistence errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Writing the activation record failed. The record must be assumed
    /// unsaved.
    #[error("failed to save activation data: {0}")]
    Persistence(String),

    /// The storage backend failed to read or delete an entry.
    #[error("storage error: {0}")]
    Storage(String),

    /// The stored payload could not be decoded into a record.
    #[error("corrupt activation record: {0}")]
    CorruptRecord(String),

    /// Sealing or opening a stored value failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] traducteur_crypto::CryptoError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entry names are restricted to a filesystem-safe alphabet.
    #[error("invalid storage entry name: {0:?}")]
    InvalidEntryName(String),
}

/// Result type for activation persistence operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
