//! HTTP gateway client for the Traducteur service.
//!
//! All network traffic goes through [`ApiClient`]. A request travels through
//! three explicit layers:
//!
//! 1. [`Logged`]: logs method, URL and outcome
//! 2. a [`Transport`]: [`ReqwestTransport`] in production, a fake in tests
//! 3. [`translate_outcome`]: maps the raw outcome onto [`ApiErrorKind`]
//!
//! Success of `activate` and `translate` is decided by the `success` flag in
//! the body, not by the HTTP status: a 200 with `success: false` resolves.

mod client;
mod config;
mod error;
mod middleware;
mod transport;

pub use client::ApiClient;
pub use config::{ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use error::{ApiError, ApiErrorKind, ApiResult, UNEXPECTED_MESSAGE, UNREACHABLE_MESSAGE};
pub use middleware::{translate_outcome, Logged};
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, Transport, TransportFailure};

pub use reqwest::Method;
