//! The gateway client.

use crate::config::{join_url, ApiConfig};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{translate_outcome, Logged};
use crate::transport::{ApiRequest, ReqwestTransport, Transport, TransportFailure};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};
use traducteur_types::{
    ActivationRequest, ActivationResponse, HealthStatus, TranslationRequest, TranslationResponse,
};

/// Settings that may change after construction.
#[derive(Debug, Clone)]
struct Defaults {
    base_url: String,
    auth_token: Option<String>,
}

/// Single point of contact with the remote service.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    defaults: RwLock<Defaults>,
}

impl ApiClient {
    /// Creates a client over a logged [`ReqwestTransport`].
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config.timeout()).map_err(|e| {
            error!("{}", e);
            ApiError::from(e)
        })?;
        Ok(Self::with_transport(
            config.base_url.clone(),
            Logged::new(transport),
        ))
    }

    /// Creates a client over any transport. No logging is added.
    pub fn with_transport(base_url: impl Into<String>, transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            defaults: RwLock::new(Defaults {
                base_url: base_url.into(),
                auth_token: None,
            }),
        }
    }

    pub async fn base_url(&self) -> String {
        self.defaults.read().await.base_url.clone()
    }

    /// Points subsequent requests at another service root.
    pub async fn update_base_url(&self, base_url: impl Into<String>) {
        self.defaults.write().await.base_url = base_url.into();
    }

    /// Sends `Authorization: Bearer <token>` on subsequent requests.
    pub async fn set_auth_token(&self, token: impl Into<String>) {
        self.defaults.write().await.auth_token = Some(token.into());
    }

    pub async fn clear_auth_token(&self) {
        self.defaults.write().await.auth_token = None;
    }

    pub async fn has_auth_token(&self) -> bool {
        self.defaults.read().await.auth_token.is_some()
    }

    /// Verifies an activation key. `POST /api/activate`.
    ///
    /// A rejected key is `Ok` with `success: false`.
    pub async fn activate(&self, request: &ActivationRequest) -> ApiResult<ActivationResponse> {
        self.post("/api/activate", request).await
    }

    /// Translates text. `POST /api/translate`.
    ///
    /// A refused translation is `Ok` with `success: false`.
    pub async fn translate(&self, request: &TranslationRequest) -> ApiResult<TranslationResponse> {
        self.post("/api/translate", request).await
    }

    /// `GET /api/health`.
    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.request(Method::GET, "/api/health", None).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| {
            let failure = TransportFailure::Local(format!("failed to serialize body: {e}"));
            error!("{}", failure);
            ApiError::from(failure)
        })?;
        self.request(Method::POST, path, Some(body)).await
    }

    /// Sends a request to `path` under the current base URL and decodes the
    /// JSON reply. All typed operations go through here.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<R> {
        let request = {
            let defaults = self.defaults.read().await;
            let mut request = ApiRequest::new(method, join_url(&defaults.base_url, path))
                .with_bearer(defaults.auth_token.clone());
            if let Some(body) = body {
                request = request.with_body(body);
            }
            request
        };

        let response = translate_outcome(self.transport.send(&request).await)?;

        serde_json::from_str(&response.body).map_err(|e| {
            error!(
                url = %request.url,
                status = response.status,
                "Failed to decode response body: {}",
                e
            );
            ApiError::unexpected()
        })
        .inspect(|_| debug!("Decoded response from {}", request.url))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}
