//! Activation and translation flows for Traducteur, independent of any UI.
//!
//! - [`Route::resolve`] is the startup/navigation gate
//! - [`ActivationFlow`] turns a user-entered key into a persisted
//!   [`ActivationRecord`](traducteur_license::ActivationRecord)
//! - [`TranslatorSession`] holds the translator screen state and its rules
//!
//! Every failure path returns an [`AppError`] whose `Display` is the message
//! to show the user.

mod activation;
mod error;
mod gate;
mod translator;

pub use activation::{ActivationFlow, ActivationOutcome, INVALID_KEY_MESSAGE};
pub use error::{AppError, AppResult};
pub use gate::Route;
pub use translator::{TranslatorSession, MAX_INPUT_CHARS, TRANSLATION_FAILED_MESSAGE};
