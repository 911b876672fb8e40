#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `rpclink-client` — JSON-RPC Batch Client
//!
//! Sends one call or a batch of calls in a single HTTP exchange and
//! correlates the returned responses with the calls that produced them.
//!
//! ## Flow
//!
//! 1. [`CallTransformer`] turns each [`jsonrpc::RpcCall`] into a wire request,
//!    assigning identifiers to generic calls.
//! 2. [`JsonRpcClient`] posts the single object or the array through a
//!    [`transport::HttpClient`].
//! 3. [`ResponseCollection`] parses the body once and resolves each call's
//!    response on demand, keyed by the [`CallTicket`] of the call.
//!
//! Notifications never get an answer from the server; they resolve to
//! [`jsonrpc::JsonRpcResponse::Notification`].
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use client::JsonRpcClient;
//! use jsonrpc::{GenericCall, JsonRpcNotification, RpcCall, SequentialIdGenerator};
//! use transport::DynHttpClient;
//!
//! async fn demo(http: DynHttpClient) -> Result<(), client::ClientError> {
//!     let ids = Arc::new(SequentialIdGenerator::default());
//!     let mut client = JsonRpcClient::with_id_generator(http, "http://127.0.0.1:8080/", ids);
//!
//!     let collection = client
//!         .invoke(vec![
//!             RpcCall::from(GenericCall::new("getinfo", None)),
//!             RpcCall::from(JsonRpcNotification::new("log", None)),
//!         ])
//!         .await?;
//!
//!     for ticket in collection.tickets() {
//!         println!("{:?}", collection.get_response(ticket)?);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod collection;
mod error;
mod transformer;

pub use client::{Calls, JsonRpcClient};
pub use collection::{CallTicket, Iter, ResponseCollection};
pub use error::{ClientError, FailureCause, Result};
pub use transformer::{CallTransformer, RequestTransformation};
