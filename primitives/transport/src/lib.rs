#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `rpclink-transport` — HTTP Exchange Abstraction
//!
//! This crate defines the **HTTP collaborator** that an rpclink client
//! sends its JSON-RPC bodies through.
//!
//! The client never talks to a socket itself. It builds an [`HttpRequest`],
//! hands it to an [`HttpClient`], and receives the raw [`HttpResponse`]
//! (status and body text). How the exchange happens — a real network
//! stack, an in-process test kernel, or a canned mock — is up to the
//! implementation.
//!
//! ## Core Concepts
//!
//! ### `HttpClient` Trait
//! Performs exactly one exchange per [`HttpClient::request`] call and can
//! discard its session state (cookies, history) via [`HttpClient::restart`].
//! Backends such as `rpclink-http` implement this trait.
//!
//! ### `TransportError`
//! Enumerates the ways an exchange can fail before a response is available.
//! A non-200 status is *not* a transport error; it is reported through
//! [`HttpResponse::status`] and judged by the caller.
//!
//! ## Feature Flags
//! - `test-utils`: Enables [`mock::MockHttpClient`], an in-memory client
//!   that replays queued responses and records every request.
//!
//! ## Example
//! ```no_run
//! use transport::{HttpClient, HttpRequest, TransportError};
//!
//! async fn ping(client: &mut dyn HttpClient) -> Result<u16, TransportError> {
//!     let request = HttpRequest::json_post("http://127.0.0.1:8080/rpc", "{}");
//!     let response = client.request(request).await?;
//!     Ok(response.status)
//! }
//! ```

use async_trait::async_trait;

#[cfg(feature = "test-utils")]
pub mod mock;

/// Type alias for structured error handling in transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Canonical error type for all HTTP client implementations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The exchange itself failed (connection refused, timeout, TLS failure).
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// The request could not be built (bad method, URI or header).
    #[error("Invalid HTTP request: {0}")]
    InvalidRequest(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Any other error not covered by the specific variants above.
    #[error("Other error: {0}")]
    Other(String),
}

/// Media type of every JSON-RPC body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// An HTTP request as handed to an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method, e.g. `POST`.
    pub method: String,
    /// Target URI.
    pub uri: String,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: String,
}

impl HttpRequest {
    /// Builds a `POST` carrying a JSON body.
    ///
    /// Both `Content-Type` and `Accept` are set to `application/json`.
    pub fn json_post(uri: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            uri: uri.into(),
            headers: vec![
                ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
                ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
            ],
            body: body.into(),
        }
    }

    /// Returns the first header matching `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

/// The status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text. Empty when the server sent nothing.
    pub content: String,
}

impl HttpResponse {
    /// Creates a response with the given status and body.
    pub fn new(status: u16, content: impl Into<String>) -> Self {
        Self { status, content: content.into() }
    }

    /// Shorthand for a `200 OK` response.
    pub fn ok(content: impl Into<String>) -> Self { Self::new(200, content) }
}

/// An HTTP client with session state.
///
/// Implementations must perform exactly one exchange per call to
/// [`HttpClient::request`] and must not retry on their own.
#[async_trait]
pub trait HttpClient: Send {
    /// Sends `request` and returns the server's response.
    async fn request(&mut self, request: HttpRequest) -> Result<HttpResponse>;

    /// Discards session state such as cookies and history.
    fn restart(&mut self);
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    async fn request(&mut self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).request(request).await
    }

    fn restart(&mut self) { (**self).restart() }
}

/// Type alias for a boxed, dynamically dispatched HTTP client.
pub type DynHttpClient = Box<dyn HttpClient>;
