//! Error kinds surfaced by the client and its response collections.

use jsonrpc::{RequestId, ResponseParseError};
use transport::TransportError;

use crate::CallTicket;

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// The three ways a call can fail from the caller's point of view.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The exchange could not be completed or its body could not be read.
    ///
    /// Returned by [`crate::JsonRpcClient::invoke`] for every failure; the
    /// original cause is kept as the error source.
    #[error("remote call failed: {0}")]
    RemoteCallFailed(#[source] FailureCause),

    /// A request was sent but the server returned no response with its id.
    #[error("request `{method}` with id {id} was sent but not responded")]
    NotResponded {
        /// Method of the unanswered request.
        method: String,
        /// Identifier of the unanswered request.
        id: RequestId,
    },

    /// The ticket does not belong to this collection.
    #[error("call {0} was not invoked for this collection")]
    OutOfBounds(CallTicket),
}

/// Underlying reason of a [`ClientError::RemoteCallFailed`].
#[derive(thiserror::Error, Debug)]
pub enum FailureCause {
    /// The server answered with a status other than 200.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response body is not JSON.
    #[error(transparent)]
    Parse(#[from] ResponseParseError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(String),

    /// A call needed an identifier but the client has no id generator.
    #[error("no id generator configured for call `{method}`")]
    MissingIdGenerator {
        /// Method of the call that could not be identified.
        method: String,
    },
}

impl From<serde_json::Error> for FailureCause {
    fn from(err: serde_json::Error) -> Self { FailureCause::Encode(err.to_string()) }
}

impl ClientError {
    /// The cause of a failed invocation, if this is one.
    pub fn cause(&self) -> Option<&FailureCause> {
        match self {
            ClientError::RemoteCallFailed(cause) => Some(cause),
            _ => None,
        }
    }
}
