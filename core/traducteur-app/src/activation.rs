//! Activation flow: key entry → remote verification → local persistence.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use traducteur_api::ApiClient;
use traducteur_license::{ActivationRecord, ActivationStore};
use traducteur_types::ActivationRequest;

/// Shown when the service refuses a key without saying why.
pub const INVALID_KEY_MESSAGE: &str = "Clé d'activation invalide";

/// Result of a completed activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The key was accepted and the record persisted.
    Activated(ActivationRecord),
    /// The service refused the key; carries the message to show.
    Rejected(String),
}

impl ActivationOutcome {
    #[must_use]
    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated(_))
    }
}

/// Verifies activation keys and persists the resulting record.
#[derive(Debug, Clone)]
pub struct ActivationFlow {
    api: Arc<ApiClient>,
    store: Arc<ActivationStore>,
}

impl ActivationFlow {
    pub fn new(api: Arc<ApiClient>, store: Arc<ActivationStore>) -> Self {
        Self { api, store }
    }

    /// Activates with `key`.
    ///
    /// Persisting the record is a small synchronous write on the calling task.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyActivationKey`] for a blank key (no request sent)
    /// - [`AppError::Api`] when the service could not be reached or failed
    /// - [`AppError::License`] when the granted activation could not be saved
    pub async fn activate(&self, key: &str) -> AppResult<ActivationOutcome> {
        self.activate_at(key, Utc::now()).await
    }

    /// [`activate`](Self::activate) with an explicit activation time.
    pub async fn activate_at(&self, key: &str, now: DateTime<Utc>) -> AppResult<ActivationOutcome> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::EmptyActivationKey);
        }

        let response = self.api.activate(&ActivationRequest::new(key)).await?;

        match (response.success, response.user_id) {
            (true, Some(user_id)) => {
                let record =
                    ActivationRecord::from_grant(user_id, response.expires_at.as_deref(), now);
                self.store.store(&record)?;
                info!(
                    "Activated user {} until {}",
                    record.user_id, record.expires_at
                );
                Ok(ActivationOutcome::Activated(record))
            }
            (success, _) => {
                if success {
                    warn!("Activation reported success without a user id");
                }
                let message = if response.message.trim().is_empty() {
                    INVALID_KEY_MESSAGE.to_string()
                } else {
                    response.message
                };
                Ok(ActivationOutcome::Rejected(message))
            }
        }
    }
}
