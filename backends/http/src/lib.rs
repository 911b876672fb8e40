#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `rpclink-http` — reqwest HTTP Client for rpclink
//!
//! This crate provides a concrete implementation of the
//! [`transport::HttpClient`] trait on top of [`reqwest`].
//!
//! ## Overview
//!
//! - Implements [`ReqwestClient`], a thin wrapper over [`reqwest::Client`]
//! - Keeps a cookie store per session; [`HttpClient::restart`] drops it
//! - Performs exactly one exchange per request, never retrying
//!
//! ## Example
//! ```no_run
//! use rpclink_http::ReqwestClient;
//! use transport::{HttpClient, HttpRequest};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut client = ReqwestClient::new();
//! let body = r#"{"jsonrpc":"2.0","method":"ping","id":1}"#;
//! let response = client
//!     .request(HttpRequest::json_post("http://127.0.0.1:8080/rpc", body))
//!     .await
//!     .unwrap();
//! println!("{} {}", response.status, response.content);
//! # });
//! ```

use std::time::Duration;

use async_trait::async_trait;
use transport::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// A concrete implementation of the [`HttpClient`] trait using [`reqwest`].
///
/// The underlying [`reqwest::Client`] is built lazily for each session, so
/// cookies set by the server persist until [`HttpClient::restart`] is called.
///
/// Errors encountered at any stage (request building, connection, or body
/// reading) are normalized into [`TransportError`] variants.
#[derive(Debug, Default)]
pub struct ReqwestClient {
    /// Client for the current session, if one has been started.
    session: Option<reqwest::Client>,
    /// Per-request timeout applied to every session.
    timeout: Option<Duration>,
}

impl ReqwestClient {
    /// Constructs a client without a timeout.
    pub fn new() -> Self {
        logging::trace("HTTP", "→ initializing reqwest client");
        Self::default()
    }

    /// Constructs a client whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        logging::trace("HTTP", &format!("→ initializing reqwest client, timeout {:?}", timeout));
        Self { session: None, timeout: Some(timeout) }
    }

    /// Timeout applied to every request, if any.
    pub fn timeout(&self) -> Option<Duration> { self.timeout }

    /// Whether a session (and therefore a cookie store) is currently open.
    pub fn has_session(&self) -> bool { self.session.is_some() }

    fn session(&mut self) -> Result<&reqwest::Client, TransportError> {
        if self.session.is_none() {
            let mut builder = reqwest::Client::builder().cookie_store(true);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder.build().map_err(|e| {
                tracing::error!("HTTP client - Failed to build session: {}", e);
                TransportError::Other(e.to_string())
            })?;
            self.session = Some(client);
        }

        self.session.as_ref().ok_or_else(|| TransportError::Other("session unavailable".to_string()))
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    /// Sends `request` and returns the status and body text.
    ///
    /// A non-success status is returned as a normal [`HttpResponse`]; only
    /// failures to complete the exchange become errors.
    ///
    /// # Errors
    /// - [`TransportError::InvalidRequest`] if the method, URI or a header is invalid
    /// - [`TransportError::Http`] if the exchange fails
    /// - [`TransportError::Body`] if the response body cannot be read
    async fn request(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut req = self.session()?.request(method, &request.uri);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.body(request.body).send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                tracing::error!("HTTP client - Request failed: {}", e);
                TransportError::Http(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let content = resp.text().await.map_err(|e| {
            tracing::error!("HTTP client - Failed to read body: {}", e);
            TransportError::Body(e.to_string())
        })?;

        tracing::debug!(status, bytes = content.len(), "HTTP client - response received");
        Ok(HttpResponse { status, content })
    }

    /// Drops the current session together with its cookies.
    fn restart(&mut self) { self.session = None; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let client = ReqwestClient::new();

        assert!(!client.has_session());
        assert!(client.timeout.is_none());

        let client = ReqwestClient::with_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout, Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_request_unreachable() {
        let mut client = ReqwestClient::with_timeout(Duration::from_secs(5));
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let result =
            client.request(HttpRequest::json_post(format!("http://127.0.0.1:{}/", port), "{}")).await;

        // Should fail with connection error, not return a synthetic response
        assert!(matches!(result, Err(TransportError::Http(_))));
        assert!(client.has_session());

        client.restart();
        assert!(!client.has_session());
    }

    #[tokio::test]
    async fn test_invalid_method() {
        let mut client = ReqwestClient::new();
        let mut request = HttpRequest::json_post("http://127.0.0.1:1/", "{}");
        request.method = "BAD METHOD".to_string();

        let result = client.request(request).await;
        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }
}
