//! Injectable transport layer.
//!
//! The pipeline never talks to the network directly: it hands a URL and a
//! fetch-style init to a [`RequestFunction`] and interprets the
//! [`RawResponse`] it gets back. The default implementation runs over
//! reqwest; tests and embedders substitute their own.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};

/// Fetch-style request init handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchInit {
    /// HTTP method ("GET" or "POST"); empty means GET
    pub method: String,

    /// Header name/value pairs, in send order
    pub headers: Vec<(String, String)>,

    /// Request body, if any
    pub body: Option<String>,
}

impl FetchInit {
    /// A GET request with no headers or body.
    pub fn get() -> Self {
        Self {
            method: "GET".to_string(),
            ..Self::default()
        }
    }

    /// A POST request with the given body.
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// Set or replace a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Merge caller-supplied request options into a protocol-built init.
///
/// Caller headers come first; protocol-required headers with the same name
/// replace them, and the protocol's method and body always win. Mirrors the
/// precedence of the service defaults in the upstream client.
pub(crate) fn merge_request_options(protocol: FetchInit, user: &FetchInit) -> FetchInit {
    let mut merged = FetchInit {
        method: protocol.method,
        headers: user.headers.clone(),
        body: protocol.body,
    };
    for (name, value) in protocol.headers {
        merged = merged.with_header(&name, &value);
    }
    merged
}

/// Response handed back by a transport, mimicking the fetch API surface:
/// [`RawResponse::text`] for the raw body, [`RawResponse::json`] for a
/// parsed body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    body: Vec<u8>,
}

impl RawResponse {
    /// Wrap a response body.
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }

    /// The body as text (lossy for non-UTF-8 payloads such as audio).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The body parsed as JSON.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::BadResponse(format!("invalid JSON body: {}", e)))
    }

    /// The raw body bytes (audio endpoints return binary).
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }
}

impl From<&str> for RawResponse {
    fn from(body: &str) -> Self {
        Self::new(body.as_bytes().to_vec())
    }
}

/// The transport callable.
///
/// Implementations must tolerate being called once per single-strategy
/// attempt and once per batch-strategy attempt, including the fallback
/// retry. Timeout and cancellation semantics belong to the implementation;
/// the pipeline surfaces any failure as [`Error::Transport`].
#[async_trait]
pub trait RequestFunction: Send + Sync {
    async fn request(&self, url: &str, init: &FetchInit) -> Result<RawResponse>;
}

/// Default transport over a shared reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestFunction for HttpTransport {
    async fn request(&self, url: &str, init: &FetchInit) -> Result<RawResponse> {
        let mut request = if init.method.eq_ignore_ascii_case("POST") {
            self.client.post(url)
        } else {
            self.client.get(url)
        };

        for (name, value) in &init.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &init.body {
            request = request.body(body.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "service returned {} for {}",
                status, url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("failed to read response body: {}", e)))?;

        Ok(RawResponse::new(body.to_vec()))
    }
}

/// Shared default transport, created once per process.
pub(crate) fn default_transport() -> Arc<dyn RequestFunction> {
    static DEFAULT: OnceLock<Arc<HttpTransport>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(HttpTransport::new())).clone()
}
