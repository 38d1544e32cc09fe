//! The network seam.
//!
//! The client never talks to `reqwest` directly; it hands a built
//! [`HttpRequest`] to a [`Transport`] and gets back the status, headers and
//! body, or a failure that never produced a response. Those failures are what
//! the client classifies as [`Error::Network`](crate::Error::Network).

use crate::error::BoxError;
use crate::request::{dump_headers, HttpRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A response as received, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Multi-line dump for diagnostics.
    pub fn dump(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.status,
            dump_headers(&self.headers),
            self.text()
        )
    }
}

/// Sends one request and returns whatever came back.
///
/// Implementations must not retry or interpret status codes; any HTTP response
/// counts as `Ok`, even a 500.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use http::{HeaderMap, StatusCode};
/// use srcom::error::BoxError;
/// use srcom::request::HttpRequest;
/// use srcom::transport::{RawResponse, Transport};
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl Transport for Canned {
///     async fn send(&self, _request: &HttpRequest) -> Result<RawResponse, BoxError> {
///         Ok(RawResponse {
///             status: StatusCode::OK,
///             headers: HeaderMap::new(),
///             body: self.0.as_bytes().to_vec(),
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> std::result::Result<RawResponse, BoxError>;
}

/// The default transport: a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unknown`] if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unknown(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    /// Wraps an already configured `reqwest` client.
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> std::result::Result<RawResponse, BoxError> {
        let mut builder = self
            .http_client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        // A body cut off mid-read is a network failure, not a decode failure.
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
