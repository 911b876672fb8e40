//! The error object carried by failed JSON-RPC responses.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error member of a JSON-RPC error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code.
    pub code: i64,
    /// Short description of the error.
    pub message: String,
    /// Additional server-defined information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Invalid JSON was received by the server.
    pub const PARSE_ERROR: i64 = -32700;
    /// The JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// The method does not exist or is not available.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i64 = -32603;

    /// Creates an error object.
    pub fn new(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self { code, message: message.into(), data }
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display() {
        let err = JsonRpcError::new(JsonRpcError::INVALID_PARAMS, "Invalid data received", None);
        assert_eq!(err.to_string(), "[-32602] Invalid data received");
    }

    #[test]
    fn test_data_is_optional() {
        let err: JsonRpcError =
            serde_json::from_value(json!({"code": 1, "message": "m"})).expect("deserialize");
        assert_eq!(err.data, None);
        assert_eq!(serde_json::to_value(&err).expect("serialize"), json!({"code": 1, "message": "m"}));
    }
}
