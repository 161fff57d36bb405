//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL used when deployment configuration provides none.
pub const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Per-request deadline.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "TRADUCTEUR_API_BASE_URL";

/// Transport settings fixed at client construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service root, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Request deadline in milliseconds. A request exceeding it is reported
    /// as a connectivity failure.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    /// Defaults with the base URL taken from `TRADUCTEUR_API_BASE_URL` when
    /// set to a non-blank value.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        config
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Joins a base URL and an absolute path with exactly one slash.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
