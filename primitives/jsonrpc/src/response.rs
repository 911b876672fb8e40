//! Response envelopes and their parsing rules.

use serde_json::{Map, Value};

use crate::{JsonRpcError, RequestId, VERSION};

/// Errors raised while turning raw response data into [`JsonRpcResponse`]s.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResponseParseError {
    /// The response body as a whole is not JSON.
    #[error("not a JSON response: {0}")]
    NotAJsonResponse(String),

    /// A single response object does not conform to JSON-RPC 2.0.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A parsed JSON-RPC response.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonRpcResponse {
    /// The call succeeded; `result` may be `null`.
    Success {
        /// Identifier of the answered request.
        id: RequestId,
        /// Returned value.
        result: Value,
    },
    /// The server reported an error for the call.
    Error {
        /// Identifier of the answered request. `None` when the server could
        /// not tell which request failed, e.g. on a parse error.
        id: Option<RequestId>,
        /// Error object.
        error: JsonRpcError,
    },
    /// Stand-in for calls sent as notifications. Always successful, no payload.
    Notification,
}

impl JsonRpcResponse {
    /// Parses a single response object.
    ///
    /// The object must declare `"jsonrpc": "2.0"`, carry an integer or string
    /// `id`, and contain a `result` or a non-null `error` member. Error
    /// responses may also carry a `null` id.
    pub fn from_value(raw: &Value) -> Result<Self, ResponseParseError> {
        let object = raw.as_object().ok_or_else(|| malformed("response is not an object"))?;

        match object.get("jsonrpc") {
            Some(Value::String(version)) if version == VERSION => {}
            Some(other) => return Err(malformed(format!("unsupported version {}", other))),
            None => return Err(malformed("missing `jsonrpc` member")),
        }

        let id = parse_id(object)?;
        let error = object.get("error").filter(|e| !e.is_null());

        match (object.get("result"), error) {
            (Some(result), None) => {
                let id = id.ok_or_else(|| malformed("null id on a successful response"))?;
                Ok(JsonRpcResponse::Success { id, result: result.clone() })
            }
            (None, Some(error)) => {
                let error = serde_json::from_value::<JsonRpcError>(error.clone())
                    .map_err(|e| malformed(format!("invalid error object: {}", e)))?;
                Ok(JsonRpcResponse::Error { id, error })
            }
            (Some(_), Some(_)) => Err(malformed("both `result` and `error` present")),
            (None, None) => Err(malformed("neither `result` nor `error` present")),
        }
    }

    /// `false` only for error responses.
    pub fn is_successful(&self) -> bool { !matches!(self, JsonRpcResponse::Error { .. }) }

    /// Identifier of the answered request. `None` for the notification marker
    /// and for error responses with a `null` id.
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            JsonRpcResponse::Success { id, .. } => Some(id),
            JsonRpcResponse::Error { id, .. } => id.as_ref(),
            JsonRpcResponse::Notification => None,
        }
    }

    /// Result value of a successful response.
    pub fn body(&self) -> Option<&Value> {
        match self {
            JsonRpcResponse::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Error object of a failed response.
    pub fn error(&self) -> Option<&JsonRpcError> {
        match self {
            JsonRpcResponse::Error { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// `Ok(None)` stands for an explicit `null` id.
fn parse_id(object: &Map<String, Value>) -> Result<Option<RequestId>, ResponseParseError> {
    match object.get("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|n| Some(RequestId::Number(n)))
            .ok_or_else(|| malformed(format!("non-integer id {}", n))),
        Some(Value::String(s)) => Ok(Some(RequestId::String(s.clone()))),
        Some(Value::Null) => Ok(None),
        Some(other) => Err(malformed(format!("id {} cannot be correlated", other))),
        None => Err(malformed("missing `id` member")),
    }
}

fn malformed(msg: impl Into<String>) -> ResponseParseError {
    ResponseParseError::MalformedResponse(msg.into())
}
