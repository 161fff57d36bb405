//! Startup/navigation gate.

use traducteur_license::ActivationStore;

/// Where the user lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// No valid activation: ask for a key.
    Activation,
    /// Activated: show the translator.
    Translator,
}

impl Route {
    /// Picks the route from the store. Reading clears an expired record.
    pub fn resolve(store: &ActivationStore) -> Self {
        if store.is_activated() {
            Self::Translator
        } else {
            Self::Activation
        }
    }
}
