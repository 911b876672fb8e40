//! Turning caller-supplied calls into wire requests.

use std::fmt;
use std::sync::Arc;

use jsonrpc::{IdGenerator, JsonRpcRequest, RpcCall, WireCall};

use crate::FailureCause;

/// Assigns identifiers to generic calls and passes wire-shaped calls through.
#[derive(Clone, Default)]
pub struct CallTransformer {
    id_generator: Option<Arc<dyn IdGenerator>>,
}

impl fmt::Debug for CallTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallTransformer")
            .field("id_generator", &self.id_generator.as_ref().map(|_| "<dyn IdGenerator>"))
            .finish()
    }
}

impl CallTransformer {
    /// A transformer that can only pass wire-shaped calls through.
    pub fn new() -> Self { Self::default() }

    /// A transformer drawing identifiers from `id_generator`.
    pub fn with_id_generator(id_generator: Arc<dyn IdGenerator>) -> Self {
        Self { id_generator: Some(id_generator) }
    }

    /// Whether generic calls can be transformed.
    pub fn has_id_generator(&self) -> bool { self.id_generator.is_some() }

    /// Produces the wire form of `call`.
    ///
    /// Requests and notifications are returned unchanged. Generic calls get a
    /// fresh identifier; without an id generator they cannot be sent and
    /// [`FailureCause::MissingIdGenerator`] is returned.
    pub fn transform(&self, call: &RpcCall) -> Result<WireCall, FailureCause> {
        match call {
            RpcCall::Request(request) => Ok(WireCall::Request(request.clone())),
            RpcCall::Notification(notification) => Ok(WireCall::Notification(notification.clone())),
            RpcCall::Generic(generic) => {
                let generator = self.id_generator.as_ref().ok_or_else(|| {
                    FailureCause::MissingIdGenerator { method: generic.method.clone() }
                })?;
                let id = generator.request_identifier(call);
                Ok(WireCall::Request(JsonRpcRequest::from_call(generic, id)))
            }
        }
    }
}

/// A call paired with the wire request it was sent as.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTransformation {
    original: RpcCall,
    transformed: WireCall,
}

impl RequestTransformation {
    /// Records that `original` was sent as `transformed`.
    pub fn new(original: RpcCall, transformed: WireCall) -> Self { Self { original, transformed } }

    /// The call as supplied by the caller.
    pub fn original_call(&self) -> &RpcCall { &self.original }

    /// The request actually sent.
    pub fn transformed_call(&self) -> &WireCall { &self.transformed }
}
