//! Error taxonomy at the transport boundary.
//!
//! Every failure reaches callers as one [`ApiError`] whose `Display` is the
//! human-readable message. [`ApiErrorKind`] lets callers branch without
//! matching on message text.

use crate::transport::TransportFailure;
use thiserror::Error;

/// Message for any request that received no response (unreachable host,
/// DNS failure, deadline exceeded).
pub const UNREACHABLE_MESSAGE: &str =
    "Impossible de se connecter au serveur. Vérifiez votre connexion internet.";

/// Message for failures before the request left the client.
pub const UNEXPECTED_MESSAGE: &str = "Une erreur inattendue s'est produite.";

/// Result type for gateway operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The server answered with a non-success status.
    ServerRejected { status: u16 },
    /// No response was received.
    Unreachable,
    /// Anything else, including local serialization failures and
    /// undecodable response bodies.
    Unexpected,
}

/// A rejected gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
}

impl ApiError {
    /// Uses the server-supplied message when present, else
    /// `Server error: {status}`.
    pub fn server_rejected(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Server error: {status}"));
        Self {
            kind: ApiErrorKind::ServerRejected { status },
            message,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            kind: ApiErrorKind::Unreachable,
            message: UNREACHABLE_MESSAGE.to_string(),
        }
    }

    pub fn unexpected() -> Self {
        Self {
            kind: ApiErrorKind::Unexpected,
            message: UNEXPECTED_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, for server rejections.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::ServerRejected { status } => Some(status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        self.kind == ApiErrorKind::Unreachable
    }
}

impl From<TransportFailure> for ApiError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::NoResponse(_) => Self::unreachable(),
            TransportFailure::Local(_) => Self::unexpected(),
        }
    }
}
