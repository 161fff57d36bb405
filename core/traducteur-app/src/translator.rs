//! Translator screen state.

use crate::error::{AppError, AppResult};
use crate::gate::Route;
use std::sync::Arc;
use tracing::{debug, info};
use traducteur_api::ApiClient;
use traducteur_license::ActivationStore;
use traducteur_types::{Language, TranslationRequest};

/// Longest accepted input, in characters.
pub const MAX_INPUT_CHARS: usize = 500;

/// Shown when the service refuses a translation without saying why.
pub const TRANSLATION_FAILED_MESSAGE: &str = "Impossible de traduire le texte";

/// Language pair plus input/output text for one translator screen.
///
/// [`translate`](Self::translate) borrows the session mutably, so at most one
/// translation is in flight per session.
#[derive(Debug)]
pub struct TranslatorSession {
    api: Arc<ApiClient>,
    store: Arc<ActivationStore>,
    source: Language,
    target: Language,
    input: String,
    output: String,
}

impl TranslatorSession {
    /// A session translating French to English with empty texts.
    pub fn new(api: Arc<ApiClient>, store: Arc<ActivationStore>) -> Self {
        Self {
            api,
            store,
            source: Language::Fr,
            target: Language::En,
            input: String::new(),
            output: String::new(),
        }
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn set_source(&mut self, language: Language) {
        self.source = language;
    }

    pub fn set_target(&mut self, language: Language) {
        self.target = language;
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Translates the trimmed input and stores the result as the output.
    ///
    /// On any error the previous output is left unchanged.
    pub async fn translate(&mut self) -> AppResult<&str> {
        let text = self.input.trim();
        if text.is_empty() {
            return Err(AppError::EmptyText);
        }
        if self.source == self.target {
            return Err(AppError::SameLanguages);
        }
        if text.chars().count() > MAX_INPUT_CHARS {
            return Err(AppError::TextTooLong {
                max: MAX_INPUT_CHARS,
            });
        }

        debug!(
            "Translation request: {} chars, {} -> {}",
            text.chars().count(),
            self.source,
            self.target
        );
        let request = TranslationRequest::new(text, self.source, self.target);
        let response = self.api.translate(&request).await?;

        match response.translated_text {
            Some(translated) if response.success => {
                self.output = translated;
                Ok(self.output.as_str())
            }
            _ => Err(AppError::TranslationRejected(
                response
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| TRANSLATION_FAILED_MESSAGE.to_string()),
            )),
        }
    }

    /// Exchanges source and target. When both input and output hold text,
    /// the two texts are exchanged too. No-op when the languages are equal.
    pub fn swap_languages(&mut self) {
        if self.source == self.target {
            return;
        }
        std::mem::swap(&mut self.source, &mut self.target);
        if !self.input.is_empty() && !self.output.is_empty() {
            std::mem::swap(&mut self.input, &mut self.output);
        }
    }

    /// Empties input and output.
    pub fn clear_text(&mut self) {
        self.input.clear();
        self.output.clear();
    }

    /// Clears the activation and the session texts.
    pub fn logout(&mut self) -> Route {
        info!("Logging out");
        self.store.clear();
        self.clear_text();
        Route::Activation
    }
}
