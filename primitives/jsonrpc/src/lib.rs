#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `rpclink-jsonrpc` — JSON-RPC 2.0 Object Model
//!
//! This crate defines the value objects exchanged between an rpclink
//! client and a JSON-RPC 2.0 endpoint. It performs no I/O.
//!
//! ## Core Concepts
//!
//! ### `RpcCall`
//! The caller-facing description of a remote invocation. A call is either
//! a [`GenericCall`] (method and params, no identifier yet), or an already
//! wire-shaped [`JsonRpcRequest`] / [`JsonRpcNotification`].
//!
//! ### `WireCall`
//! What actually goes on the wire. Generic calls are turned into requests
//! by assigning an identifier from an [`IdGenerator`]; wire-shaped calls
//! pass through unchanged.
//!
//! ### `JsonRpcResponse`
//! A parsed response envelope: success, error, or the fixed
//! [`JsonRpcResponse::Notification`] marker used for calls that never
//! receive a reply.
//!
//! ## Example
//! ```
//! use jsonrpc::{JsonRpcResponse, RequestId};
//! use serde_json::json;
//!
//! let raw = json!({"jsonrpc": "2.0", "id": 1, "result": null});
//! let response = JsonRpcResponse::from_value(&raw).expect("valid response");
//! assert!(response.is_successful());
//! assert_eq!(response.id(), Some(&RequestId::Number(1)));
//! ```

mod error;
mod id;
mod request;
mod response;

pub use error::JsonRpcError;
pub use id::{IdGenerator, RequestId, SequentialIdGenerator};
pub use request::{GenericCall, JsonRpcNotification, JsonRpcRequest, RpcCall, WireCall};
pub use response::{JsonRpcResponse, ResponseParseError};

/// Protocol version string carried by every request and response.
pub const VERSION: &str = "2.0";
