//! Sealing key derivation.

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of sealing keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// A sealing key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SealingKey {
    bytes: [u8; KEY_SIZE],
}

impl SealingKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SealingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealingKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives a key from stable device material.
///
/// `context` separates keys used for different purposes from the same
/// material. The same `(context, material)` pair always yields the same key.
pub fn derive_key(context: &str, material: &[u8]) -> SealingKey {
    let mut hasher = Sha256::new();
    hasher.update((context.len() as u64).to_be_bytes());
    hasher.update(context.as_bytes());
    hasher.update(material);
    let digest = hasher.finalize();

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&digest);
    SealingKey::from_bytes(bytes)
}

/// Generates a random key.
pub fn generate_random_key() -> SealingKey {
    let mut bytes = [0u8; KEY_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    SealingKey::from_bytes(bytes)
}
