//! Mock HTTP client for testing.
//!
//! Responses are scripted as a queue consumed one per request, which makes
//! retry sequences easy to express: fail, fail, then stream a body. When the
//! queue is empty the default response is used.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use crate::error::TransportError;
use crate::traits::{ByteStream, Headers, HttpClient};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
    /// When the request was issued (tokio clock, so paused-time tests are exact)
    pub at: Instant,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Request fails before any body is returned
    Error(TransportError),
    /// Body delivered as these chunks, then a clean end
    Stream(Vec<Bytes>),
    /// Body delivered as these chunks, then a read error
    StreamThenError(Vec<Bytes>, TransportError),
    /// Body delivered as these chunks, then the stream never ends
    StreamThenHang(Vec<Bytes>),
}

impl MockResponse {
    /// Convenience: a body built from SSE frame text.
    pub fn sse<S: AsRef<str>>(frames: &[S]) -> Self {
        MockResponse::Stream(
            frames
                .iter()
                .map(|frame| Bytes::from(frame.as_ref().to_string()))
                .collect(),
        )
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use studio_stream::adapters::mock::{MockHttpClient, MockResponse};
/// use studio_stream::error::TransportError;
///
/// let client = MockHttpClient::new();
/// client.push_response(MockResponse::Error(TransportError::Io("reset".into())));
/// client.push_response(MockResponse::sse(&["event: done\n\n"]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Responses consumed in order, one per request
    queue: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Used once the queue is drained
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request.
    pub fn push_response(&self, response: MockResponse) {
        self.queue.lock().unwrap().push_back(response);
    }

    /// Set a response for requests beyond the queue.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
            at: Instant::now(),
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return Some(response);
        }
        self.default_response.lock().unwrap().clone()
    }
}

fn chunk_stream(
    chunks: Vec<Bytes>,
) -> impl futures::Stream<Item = Result<Bytes, TransportError>> + Send {
    stream::iter(chunks.into_iter().map(Ok))
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError> {
        self.record_request(url, headers, body);

        match self.next_response() {
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(chunks)) => Ok(Box::pin(chunk_stream(chunks))),
            Some(MockResponse::StreamThenError(chunks, err)) => Ok(Box::pin(
                chunk_stream(chunks).chain(stream::once(async move { Err(err) })),
            )),
            Some(MockResponse::StreamThenHang(chunks)) => {
                Ok(Box::pin(chunk_stream(chunks).chain(stream::pending())))
            }
            None => Err(TransportError::Other(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}
