// SPDX-License-Identifier: MIT OR Apache-2.0

//! rpclink umbrella crate.
//!
//! Re-exports the workspace member crates under one roof so applications
//! can depend on a single package.
//!
//! All functional code lives in the member crates under `primitives/`,
//! `backends/` and `client/`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

pub use client::{
    CallTicket, CallTransformer, Calls, ClientError, FailureCause, JsonRpcClient,
    RequestTransformation, ResponseCollection,
};
pub use jsonrpc::{
    GenericCall, IdGenerator, JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    RequestId, RpcCall, SequentialIdGenerator, WireCall,
};
pub use transport::{HttpClient, HttpRequest, HttpResponse, TransportError};
pub use client;
pub use config;
pub use jsonrpc;
pub use logging;
pub use transport;

/// The reqwest-backed [`HttpClient`].
#[cfg(feature = "http")]
pub use rpclink_http as http;

/// Miscellaneous metadata about the rpclink workspace.
pub mod rpclink_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Builds a client for the endpoint in `config`, backed by reqwest.
///
/// `timeout_secs`, when set, bounds every request the client sends.
#[cfg(feature = "http")]
pub fn connect(config: &config::ClientConfig) -> JsonRpcClient<rpclink_http::ReqwestClient> {
    let http = match config.timeout_secs {
        Some(secs) => {
            rpclink_http::ReqwestClient::with_timeout(std::time::Duration::from_secs(secs))
        }
        None => rpclink_http::ReqwestClient::new(),
    };
    JsonRpcClient::from_config(http, config)
}
