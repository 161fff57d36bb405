//! Cross-cutting request handling, composed explicitly around a transport.

use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, RawResponse, Transport, TransportFailure};
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// Transport decorator that logs every request and its outcome.
///
/// Logging never changes the outcome.
#[derive(Debug, Clone)]
pub struct Logged<T> {
    inner: T,
}

impl<T> Logged<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for Logged<T> {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure> {
        info!("Making {} request to: {}", request.method, request.url);

        let outcome = self.inner.send(request).await;
        match &outcome {
            Ok(response) if response.is_success() => {
                info!("Response received from {}: {}", request.url, response.status);
            }
            Ok(response) => {
                warn!(
                    method = %request.method,
                    url = %request.url,
                    status = response.status,
                    body = %response.body,
                    "API request failed"
                );
            }
            Err(failure) => {
                error!(
                    method = %request.method,
                    url = %request.url,
                    message = %failure,
                    "API request failed"
                );
            }
        }
        outcome
    }
}

/// Maps a raw transport outcome onto the gateway error taxonomy.
///
/// - 2xx → passed through untouched
/// - other status → [`ApiErrorKind::ServerRejected`](crate::ApiErrorKind)
///   with the body's `message` field if it has one
/// - no response → [`ApiErrorKind::Unreachable`](crate::ApiErrorKind)
/// - local failure → [`ApiErrorKind::Unexpected`](crate::ApiErrorKind)
pub fn translate_outcome(outcome: Result<RawResponse, TransportFailure>) -> ApiResult<RawResponse> {
    match outcome {
        Ok(response) if response.is_success() => Ok(response),
        Ok(response) => Err(ApiError::server_rejected(
            response.status,
            server_message(&response.body),
        )),
        Err(failure) => {
            debug!("Translating transport failure: {}", failure);
            Err(failure.into())
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}
