//! Calls as supplied by the caller and requests as sent on the wire.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{RequestId, VERSION};

/// A call that has no wire identity yet.
///
/// Sending it requires an identifier from an [`crate::IdGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenericCall {
    /// Remote method name.
    pub method: String,
    /// Method parameters, omitted from the wire when `None`.
    pub params: Option<Value>,
}

impl GenericCall {
    /// Creates a call to `method`.
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self { method: method.into(), params }
    }
}

/// A JSON-RPC request that expects a response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// Remote method name.
    pub method: String,
    /// Method parameters, omitted from the wire when `None`.
    pub params: Option<Value>,
    /// Identifier the response must echo.
    pub id: RequestId,
}

impl JsonRpcRequest {
    /// Creates a request to `method` with identifier `id`.
    pub fn new(method: impl Into<String>, params: Option<Value>, id: impl Into<RequestId>) -> Self {
        Self { method: method.into(), params, id: id.into() }
    }

    /// Promotes a generic call to a request with the given identifier.
    pub fn from_call(call: &GenericCall, id: RequestId) -> Self {
        Self { method: call.method.clone(), params: call.params.clone(), id }
    }
}

/// A JSON-RPC request without an identifier. The server never answers it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcNotification {
    /// Remote method name.
    pub method: String,
    /// Method parameters, omitted from the wire when `None`.
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Creates a notification for `method`.
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self { method: method.into(), params }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a RequestId>,
}

impl Serialize for JsonRpcRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            jsonrpc: VERSION,
            method: &self.method,
            params: self.params.as_ref(),
            id: Some(&self.id),
        }
        .serialize(serializer)
    }
}

impl Serialize for JsonRpcNotification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope { jsonrpc: VERSION, method: &self.method, params: self.params.as_ref(), id: None }
            .serialize(serializer)
    }
}

/// Any call a client can be asked to invoke.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcCall {
    /// A call that still needs an identifier.
    Generic(GenericCall),
    /// An already wire-shaped request.
    Request(JsonRpcRequest),
    /// An already wire-shaped notification.
    Notification(JsonRpcNotification),
}

impl RpcCall {
    /// Remote method name.
    pub fn method(&self) -> &str {
        match self {
            RpcCall::Generic(c) => &c.method,
            RpcCall::Request(r) => &r.method,
            RpcCall::Notification(n) => &n.method,
        }
    }

    /// Method parameters, if any.
    pub fn params(&self) -> Option<&Value> {
        match self {
            RpcCall::Generic(c) => c.params.as_ref(),
            RpcCall::Request(r) => r.params.as_ref(),
            RpcCall::Notification(n) => n.params.as_ref(),
        }
    }

    /// Whether the call can be sent as-is, without assigning an identifier.
    pub fn is_wire_shaped(&self) -> bool { !matches!(self, RpcCall::Generic(_)) }
}

impl From<GenericCall> for RpcCall {
    fn from(call: GenericCall) -> Self { RpcCall::Generic(call) }
}

impl From<JsonRpcRequest> for RpcCall {
    fn from(request: JsonRpcRequest) -> Self { RpcCall::Request(request) }
}

impl From<JsonRpcNotification> for RpcCall {
    fn from(notification: JsonRpcNotification) -> Self { RpcCall::Notification(notification) }
}

/// A call in the form it is sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireCall {
    /// Request expecting a response.
    Request(JsonRpcRequest),
    /// Notification, never answered.
    Notification(JsonRpcNotification),
}

impl WireCall {
    /// `true` when no response will be sent for this call.
    pub fn is_notification(&self) -> bool { matches!(self, WireCall::Notification(_)) }

    /// Identifier the response will carry. `None` for notifications.
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            WireCall::Request(r) => Some(&r.id),
            WireCall::Notification(_) => None,
        }
    }

    /// Remote method name.
    pub fn method(&self) -> &str {
        match self {
            WireCall::Request(r) => &r.method,
            WireCall::Notification(n) => &n.method,
        }
    }
}
