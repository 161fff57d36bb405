//! Errors surfaced to the user.

use thiserror::Error;
use traducteur_api::ApiError;
use traducteur_license::LicenseError;

/// Result type for application flows.
pub type AppResult<T> = Result<T, AppError>;

/// A failure to show the user. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Veuillez entrer une clé d'activation")]
    EmptyActivationKey,

    #[error("Veuillez entrer du texte à traduire")]
    EmptyText,

    #[error("Veuillez sélectionner des langues différentes")]
    SameLanguages,

    #[error("Le texte ne doit pas dépasser {max} caractères")]
    TextTooLong { max: usize },

    /// The service answered but refused to translate.
    #[error("{0}")]
    TranslationRejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisting a granted activation failed.
    #[error(transparent)]
    License(#[from] LicenseError),
}

impl AppError {
    /// True for errors raised before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyActivationKey | Self::EmptyText | Self::SameLanguages | Self::TextTooLong { .. }
        )
    }
}
