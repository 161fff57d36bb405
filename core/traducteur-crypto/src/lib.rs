//! At-rest sealing for the Traducteur secure-storage backend.
//!
//! Values are sealed with ChaCha20-Poly1305. The entry name is bound as
//! associated data, so a sealed value moved under another name fails to
//! open. Keys are derived from device-specific material with SHA-256 and
//! never leave this crate unzeroized.

mod cipher;
mod error;
mod key;

pub use cipher::{open, open_string, seal, seal_string, SealedBox, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, generate_random_key, SealingKey, KEY_SIZE};
