//! The JSON-RPC client: one invocation, one HTTP exchange.

use std::fmt;
use std::sync::Arc;

use config::ClientConfig;
use jsonrpc::{
    GenericCall, IdGenerator, JsonRpcNotification, JsonRpcRequest, RpcCall, SequentialIdGenerator,
    WireCall,
};
use serde::Serialize;
use tracing::{debug, trace};
use transport::{HttpClient, HttpRequest, HttpResponse};

use crate::{
    CallTransformer, ClientError, FailureCause, RequestTransformation, ResponseCollection, Result,
};

/// What to send in one invocation.
///
/// A single call is sent as one JSON object, a batch as a JSON array.
#[derive(Debug, Clone, PartialEq)]
pub enum Calls {
    /// One call, sent as a bare object.
    Single(RpcCall),
    /// Any number of calls, sent as an array in the given order.
    Batch(Vec<RpcCall>),
}

impl Calls {
    /// Number of calls.
    pub fn len(&self) -> usize {
        match self {
            Calls::Single(_) => 1,
            Calls::Batch(calls) => calls.len(),
        }
    }

    /// `true` for an empty batch.
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl From<RpcCall> for Calls {
    fn from(call: RpcCall) -> Self { Calls::Single(call) }
}

impl From<GenericCall> for Calls {
    fn from(call: GenericCall) -> Self { Calls::Single(call.into()) }
}

impl From<JsonRpcRequest> for Calls {
    fn from(request: JsonRpcRequest) -> Self { Calls::Single(request.into()) }
}

impl From<JsonRpcNotification> for Calls {
    fn from(notification: JsonRpcNotification) -> Self { Calls::Single(notification.into()) }
}

impl From<Vec<RpcCall>> for Calls {
    fn from(calls: Vec<RpcCall>) -> Self { Calls::Batch(calls) }
}

impl FromIterator<RpcCall> for Calls {
    fn from_iter<I: IntoIterator<Item = RpcCall>>(iter: I) -> Self {
        Calls::Batch(iter.into_iter().collect())
    }
}

/// JSON-RPC 2.0 client over an injected [`HttpClient`].
///
/// Every [`invoke`](JsonRpcClient::invoke) performs exactly one HTTP
/// exchange and never retries.
pub struct JsonRpcClient<C> {
    http: C,
    uri: String,
    transformer: CallTransformer,
    pretty_print: bool,
}

impl<C> fmt::Debug for JsonRpcClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("http", &std::any::type_name::<C>())
            .field("uri", &self.uri)
            .field("transformer", &self.transformer)
            .field("pretty_print", &self.pretty_print)
            .finish()
    }
}

impl<C: HttpClient> JsonRpcClient<C> {
    /// Creates a client posting to `uri`.
    ///
    /// Without an id generator only wire-shaped calls can be invoked.
    pub fn new(http: C, uri: impl Into<String>) -> Self {
        Self { http, uri: uri.into(), transformer: CallTransformer::new(), pretty_print: true }
    }

    /// Creates a client that assigns identifiers with `id_generator`.
    pub fn with_id_generator(
        http: C,
        uri: impl Into<String>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            http,
            uri: uri.into(),
            transformer: CallTransformer::with_id_generator(id_generator),
            pretty_print: true,
        }
    }

    /// Creates a client from configuration, with sequential identifiers.
    pub fn from_config(http: C, config: &ClientConfig) -> Self {
        let ids = SequentialIdGenerator::starting_at(config.first_request_id);
        Self::with_id_generator(http, config.endpoint.clone(), Arc::new(ids))
            .pretty_print(config.pretty_print)
    }

    /// Whether request bodies are pretty-printed (the default).
    pub fn pretty_print(mut self, enabled: bool) -> Self {
        self.pretty_print = enabled;
        self
    }

    /// Endpoint every request is posted to.
    pub fn uri(&self) -> &str { &self.uri }

    /// The underlying HTTP client.
    pub fn http_client(&self) -> &C { &self.http }

    /// Sends `calls` in one HTTP exchange and collects the responses.
    ///
    /// A batch resets the HTTP session before sending.
    ///
    /// # Errors
    /// Every failure, whether while transforming the calls, encoding the
    /// body, exchanging, or reading the response, is returned as
    /// [`ClientError::RemoteCallFailed`] wrapping its cause.
    pub async fn invoke(&mut self, calls: impl Into<Calls>) -> Result<ResponseCollection> {
        let calls = calls.into();
        debug!(calls = calls.len(), uri = %self.uri, "invoking JSON-RPC");

        let outcome = match calls {
            Calls::Single(call) => self.invoke_single(call).await,
            Calls::Batch(calls) => self.invoke_batch(calls).await,
        };
        outcome.map_err(ClientError::RemoteCallFailed)
    }

    async fn invoke_single(
        &mut self,
        call: RpcCall,
    ) -> std::result::Result<ResponseCollection, FailureCause> {
        let transformed = self.transformer.transform(&call)?;
        let body = self.encode(&transformed)?;
        let response = self.send(body).await?;

        ResponseCollection::synced(response, vec![RequestTransformation::new(call, transformed)])
    }

    async fn invoke_batch(
        &mut self,
        calls: Vec<RpcCall>,
    ) -> std::result::Result<ResponseCollection, FailureCause> {
        let transformations = calls
            .into_iter()
            .map(|call| {
                let transformed = self.transformer.transform(&call)?;
                Ok(RequestTransformation::new(call, transformed))
            })
            .collect::<std::result::Result<Vec<_>, FailureCause>>()?;

        self.http.restart();

        let batch: Vec<&WireCall> =
            transformations.iter().map(RequestTransformation::transformed_call).collect();
        let body = self.encode(&batch)?;
        let response = self.send(body).await?;

        ResponseCollection::synced(response, transformations)
    }

    fn encode<T: Serialize + ?Sized>(&self, body: &T) -> std::result::Result<String, FailureCause> {
        let encoded = if self.pretty_print {
            serde_json::to_string_pretty(body)?
        } else {
            serde_json::to_string(body)?
        };
        Ok(encoded)
    }

    async fn send(&mut self, body: String) -> std::result::Result<HttpResponse, FailureCause> {
        trace!(%body, "JSON-RPC request body");
        let response = self.http.request(HttpRequest::json_post(&self.uri, body)).await?;
        debug!(status = response.status, "JSON-RPC response received");
        Ok(response)
    }
}
