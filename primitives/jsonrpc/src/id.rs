//! Request identifiers and their generators.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use crate::RpcCall;

/// Identifier correlating a request with its response.
///
/// JSON-RPC allows numbers and strings. Fractional numbers are not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer identifier.
    Number(i64),
    /// String identifier.
    String(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self { RequestId::Number(value) }
}

impl From<i32> for RequestId {
    fn from(value: i32) -> Self { RequestId::Number(value.into()) }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self { RequestId::String(value.to_string()) }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self { RequestId::String(value) }
}

/// Source of identifiers for calls that are not yet wire-shaped.
///
/// Identifiers must be unique within one invocation, otherwise responses
/// cannot be correlated unambiguously.
pub trait IdGenerator: Send + Sync {
    /// Returns the identifier to use for `call`.
    fn request_identifier(&self, call: &RpcCall) -> RequestId;
}

impl<F> IdGenerator for F
where
    F: Fn(&RpcCall) -> RequestId + Send + Sync,
{
    fn request_identifier(&self, call: &RpcCall) -> RequestId { self(call) }
}

/// Monotonic integer identifiers.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicI64,
}

impl SequentialIdGenerator {
    /// Starts counting at `first`.
    pub fn starting_at(first: i64) -> Self { Self { next: AtomicI64::new(first) } }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self { Self::starting_at(1) }
}

impl IdGenerator for SequentialIdGenerator {
    fn request_identifier(&self, _call: &RpcCall) -> RequestId {
        RequestId::Number(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::GenericCall;

    #[test]
    fn test_sequential_ids() {
        let generator = SequentialIdGenerator::starting_at(7);
        let call = RpcCall::Generic(GenericCall::new("ping", None));

        assert_eq!(generator.request_identifier(&call), RequestId::Number(7));
        assert_eq!(generator.request_identifier(&call), RequestId::Number(8));
        assert_eq!(SequentialIdGenerator::default().request_identifier(&call), RequestId::Number(1));
    }

    #[test]
    fn test_closure_generator_sees_call() {
        let generator = |call: &RpcCall| RequestId::from(format!("{}-id", call.method()));
        let call = RpcCall::Generic(GenericCall::new("getinfo", None));

        assert_eq!(generator.request_identifier(&call), RequestId::from("getinfo-id"));
    }

    #[test]
    fn test_id_serde() {
        assert_eq!(serde_json::to_value(RequestId::Number(3)).expect("serialize"), json!(3));
        assert_eq!(serde_json::to_value(RequestId::from("a")).expect("serialize"), json!("a"));

        let parsed: RequestId = serde_json::from_value(json!("x1")).expect("deserialize");
        assert_eq!(parsed, RequestId::from("x1"));
        assert!(serde_json::from_value::<RequestId>(json!(1.5)).is_err());
    }
}
