//! In-memory [`HttpClient`] for tests.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::{HttpClient, HttpRequest, HttpResponse, Result, TransportError};

/// Replays queued outcomes in order and records what it was asked to send.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    queue: VecDeque<Result<HttpResponse>>,
    requests: Vec<HttpRequest>,
    restarts: usize,
}

impl MockHttpClient {
    /// Creates a client with an empty queue.
    pub fn new() -> Self { Self::default() }

    /// Queues a response for the next unanswered request.
    pub fn push(&mut self, response: HttpResponse) -> &mut Self {
        self.queue.push_back(Ok(response));
        self
    }

    /// Queues a transport failure for the next unanswered request.
    pub fn push_error(&mut self, error: TransportError) -> &mut Self {
        self.queue.push_back(Err(error));
        self
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> &[HttpRequest] { &self.requests }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<&HttpRequest> { self.requests.last() }

    /// How many times [`HttpClient::restart`] was called.
    pub fn restarts(&self) -> usize { self.restarts }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn request(&mut self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.push(request);
        self.queue
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no queued response".to_string())))
    }

    fn restart(&mut self) { self.restarts += 1; }
}
