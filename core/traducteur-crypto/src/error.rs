//! Error types for the sealing layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while sealing or opening a value.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Sealing failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Opening failed (wrong key, wrong entry name, or tampered data).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The sealed payload is not valid base64 or is truncated.
    #[error("malformed sealed payload: {0}")]
    Malformed(String),
}
