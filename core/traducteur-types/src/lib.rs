//! Core type definitions for Traducteur.
//!
//! This crate defines the types shared by every layer of the client:
//! - The closed set of supported [`Language`]s and their picker metadata
//! - Request/response bodies exchanged with the activation and translation
//!   service
//!
//! Nothing here performs I/O.

mod language;
mod wire;

pub use language::{Language, LanguageOption, LANGUAGE_OPTIONS};
pub use wire::{
    ActivationRequest, ActivationResponse, HealthStatus, TranslationRequest, TranslationResponse,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}
