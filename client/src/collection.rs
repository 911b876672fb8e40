//! Correlating a response body with the calls of one invocation.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use jsonrpc::{JsonRpcResponse, RequestId, ResponseParseError, WireCall};
use serde_json::Value;
use tracing::warn;
use transport::HttpResponse;

use crate::{ClientError, FailureCause, RequestTransformation, Result};

static NEXT_INVOCATION: AtomicU64 = AtomicU64::new(1);

/// Handle for one call of one invocation.
///
/// Tickets are issued by the [`ResponseCollection`] of the invocation, one
/// per call in the order the calls were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallTicket {
    invocation: u64,
    index: usize,
}

impl CallTicket {
    /// Position of the call in the invocation's input.
    pub fn index(&self) -> usize { self.index }
}

impl fmt::Display for CallTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} of invocation {}", self.index, self.invocation)
    }
}

/// The responses of a single invocation.
///
/// The body is parsed once, on construction. Lookups by [`CallTicket`] are
/// resolved lazily and cached, so asking twice for the same call yields the
/// same `Arc`.
#[derive(Debug)]
pub struct ResponseCollection {
    invocation: u64,
    response: HttpResponse,
    transformations: Vec<RequestTransformation>,
    /// Parsed responses in arrival order.
    responses: Vec<Arc<JsonRpcResponse>>,
    /// Correlation key of a response id to position in `responses`.
    by_id: HashMap<RequestId, usize>,
    dropped: usize,
    resolved: Mutex<HashMap<usize, Arc<JsonRpcResponse>>>,
}

impl ResponseCollection {
    /// Parses `response` as the answer to `transformations`.
    ///
    /// # Errors
    /// [`ClientError::RemoteCallFailed`] if the status is not 200 or the body
    /// is neither empty nor JSON.
    pub fn new(response: HttpResponse, transformations: Vec<RequestTransformation>) -> Result<Self> {
        Self::synced(response, transformations).map_err(ClientError::RemoteCallFailed)
    }

    pub(crate) fn synced(
        response: HttpResponse,
        transformations: Vec<RequestTransformation>,
    ) -> std::result::Result<Self, FailureCause> {
        let mut collection = Self {
            invocation: NEXT_INVOCATION.fetch_add(1, Ordering::Relaxed),
            response,
            transformations,
            responses: Vec::new(),
            by_id: HashMap::new(),
            dropped: 0,
            resolved: Mutex::new(HashMap::new()),
        };
        collection.sync()?;
        Ok(collection)
    }

    fn sync(&mut self) -> std::result::Result<(), FailureCause> {
        if self.response.status != 200 {
            return Err(FailureCause::Status(self.response.status));
        }

        // An empty body is expected when only notifications were sent
        let raw_responses = split_body(&self.response.content)?;

        for raw in &raw_responses {
            match JsonRpcResponse::from_value(raw) {
                Ok(response) => self.store(response),
                Err(e) => {
                    self.dropped += 1;
                    warn!(error = %e, "dropping malformed response element");
                }
            }
        }
        Ok(())
    }

    fn store(&mut self, response: JsonRpcResponse) {
        let response = Arc::new(response);
        // Errors with a null id answer no particular request; keep them iterable only
        let Some(id) = response.id().map(correlation_key) else {
            warn!(error = ?response.error(), "response without id");
            self.responses.push(response);
            return;
        };

        match self.by_id.get(&id) {
            Some(&slot) => {
                warn!(%id, "duplicate response id, keeping the later response");
                self.responses[slot] = response;
            }
            None => {
                self.by_id.insert(id, self.responses.len());
                self.responses.push(response);
            }
        }
    }

    /// Tickets for every call of this invocation, in input order.
    pub fn tickets(&self) -> Vec<CallTicket> {
        (0..self.transformations.len())
            .map(|index| CallTicket { invocation: self.invocation, index })
            .collect()
    }

    /// Ticket for the call at `index` of the input.
    pub fn ticket(&self, index: usize) -> Option<CallTicket> {
        (index < self.transformations.len())
            .then_some(CallTicket { invocation: self.invocation, index })
    }

    /// Returns the response to the call identified by `ticket`.
    ///
    /// Notifications resolve to [`JsonRpcResponse::Notification`].
    ///
    /// # Errors
    /// - [`ClientError::OutOfBounds`] if the ticket was issued by another collection
    /// - [`ClientError::NotResponded`] if the server sent nothing for the request
    pub fn get_response(&self, ticket: CallTicket) -> Result<Arc<JsonRpcResponse>> {
        let transformation = self.transformation(ticket).ok_or(ClientError::OutOfBounds(ticket))?;

        let mut resolved = self.resolved.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(response) = resolved.get(&ticket.index) {
            return Ok(Arc::clone(response));
        }

        let response = match transformation.transformed_call() {
            WireCall::Notification(_) => Arc::new(JsonRpcResponse::Notification),
            WireCall::Request(request) => {
                let slot = self.by_id.get(&correlation_key(&request.id)).ok_or_else(|| {
                    ClientError::NotResponded {
                        method: request.method.clone(),
                        id: request.id.clone(),
                    }
                })?;
                Arc::clone(&self.responses[*slot])
            }
        };

        resolved.insert(ticket.index, Arc::clone(&response));
        Ok(response)
    }

    fn transformation(&self, ticket: CallTicket) -> Option<&RequestTransformation> {
        if ticket.invocation != self.invocation {
            return None;
        }
        self.transformations.get(ticket.index)
    }

    /// The calls of this invocation and what they were sent as.
    pub fn transformations(&self) -> &[RequestTransformation] { &self.transformations }

    /// The raw HTTP response.
    pub fn http_response(&self) -> &HttpResponse { &self.response }

    /// Number of response elements skipped because they were malformed.
    pub fn dropped(&self) -> usize { self.dropped }

    /// Number of parsed responses. Notifications are never counted.
    pub fn len(&self) -> usize { self.responses.len() }

    /// `true` when the server sent no valid response.
    pub fn is_empty(&self) -> bool { self.responses.is_empty() }

    /// Iterates over parsed responses in arrival order.
    pub fn iter(&self) -> Iter<'_> { Iter { inner: self.responses.iter() } }
}

/// Iterator over the responses of a [`ResponseCollection`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Arc<JsonRpcResponse>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a JsonRpcResponse;

    fn next(&mut self) -> Option<Self::Item> { self.inner.next().map(Arc::as_ref) }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ResponseCollection {
    type Item = &'a JsonRpcResponse;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Key under which a response is matched to its request.
///
/// Strings holding a canonical integer match the number they spell, so
/// request id `1` pairs with response id `"1"` and vice versa.
fn correlation_key(id: &RequestId) -> RequestId {
    match id {
        RequestId::String(s) => match s.parse::<i64>() {
            Ok(n) if n.to_string() == *s => RequestId::Number(n),
            _ => id.clone(),
        },
        RequestId::Number(_) => id.clone(),
    }
}

/// Splits a body into its response elements. A lone object counts as one.
fn split_body(content: &str) -> std::result::Result<Vec<Value>, ResponseParseError> {
    if content.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(object @ Value::Object(_)) => Ok(vec![object]),
        Ok(other) => Err(ResponseParseError::NotAJsonResponse(format!(
            "unexpected top-level value {}",
            other
        ))),
        Err(e) => Err(ResponseParseError::NotAJsonResponse(e.to_string())),
    }
}
