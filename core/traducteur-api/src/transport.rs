//! The transport seam.
//!
//! A [`Transport`] executes one fully-resolved [`ApiRequest`] and reports
//! either the raw response (any status) or why no response was obtained.
//! Status interpretation belongs to [`translate_outcome`](crate::translate_outcome).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::time::Duration;
use thiserror::Error;

/// A resolved request: absolute URL, optional JSON body, optional bearer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            bearer: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// Whatever the server sent back, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a request produced no [`RawResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// Sent (or attempted) but nothing came back: unreachable host, DNS
    /// failure, reset connection, deadline exceeded.
    #[error("no response: {0}")]
    NoResponse(String),

    /// The request could not be built or serialized.
    #[error("request not sent: {0}")]
    Local(String),
}

/// Executes resolved requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure>;
}

/// Production transport over a single pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client with a JSON `Content-Type` default header and a
    /// whole-request deadline of `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportFailure> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportFailure::Local(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure> {
        let mut builder = self.client.request(request.method.clone(), &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(RawResponse { status, body })
    }
}

/// Builder errors never left the client; everything else means no usable
/// response arrived.
fn classify(e: reqwest::Error) -> TransportFailure {
    if e.is_builder() {
        TransportFailure::Local(e.to_string())
    } else {
        TransportFailure::NoResponse(e.to_string())
    }
}
