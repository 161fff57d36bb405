//! Value sealing using ChaCha20-Poly1305.
//!
//! The associated data names the storage entry a value belongs to.

use crate::error::{CryptoError, CryptoResult};
use crate::key::SealingKey;
use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;

/// Size of nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

/// Size of authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// A sealed value: nonce plus ciphertext (auth tag included).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedBox {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
}

impl SealedBox {
    /// Total encoded size in bytes.
    pub fn len(&self) -> usize {
        NONCE_SIZE + self.ciphertext.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphertext.is_empty()
    }

    /// Encodes as base64(`nonce || ciphertext`).
    pub fn to_base64(&self) -> String {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        STANDARD.encode(&bytes)
    }

    /// Decodes the output of [`SealedBox::to_base64`].
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::Malformed(format!("invalid base64: {e}")))?;

        if bytes.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::Malformed("data too short".to_string()));
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[..NONCE_SIZE]);

        Ok(Self {
            nonce,
            ciphertext: bytes[NONCE_SIZE..].to_vec(),
        })
    }
}

/// Seals `plaintext` under `key`, binding `aad` to the result.
pub fn seal(key: &SealingKey, aad: &[u8], plaintext: &[u8]) -> CryptoResult<SealedBox> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, Payload { msg: plaintext, aad })
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    Ok(SealedBox {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Opens a value sealed by [`seal`] with the same key and `aad`.
pub fn open(key: &SealingKey, aad: &[u8], sealed: &SealedBox) -> CryptoResult<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
    let nonce = Nonce::from_slice(&sealed.nonce);

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: sealed.ciphertext.as_ref(),
                aad,
            },
        )
        .map_err(|_| {
            CryptoError::Decryption("wrong key, wrong entry or tampered data".to_string())
        })
}

/// Seals a string and returns the base64 encoding.
pub fn seal_string(key: &SealingKey, aad: &str, plaintext: &str) -> CryptoResult<String> {
    Ok(seal(key, aad.as_bytes(), plaintext.as_bytes())?.to_base64())
}

/// Opens a base64 string produced by [`seal_string`].
pub fn open_string(key: &SealingKey, aad: &str, encoded: &str) -> CryptoResult<String> {
    let sealed = SealedBox::from_base64(encoded)?;
    let bytes = open(key, aad.as_bytes(), &sealed)?;
    String::from_utf8(bytes).map_err(|e| CryptoError::Decryption(format!("invalid UTF-8: {e}")))
}
