//! Streaming transport: POST, frame the SSE body, publish decoded events.
//!
//! One call to [`TransportClient::start`] drives a whole turn, including
//! reconnection. Every suspension point (request send, chunk read, backoff
//! sleep) races the cancellation token, so a cancelled turn stops promptly
//! and never publishes an error.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::retry::RetryPolicy;
use super::status::TransportStatus;
use crate::config::StreamConfig;
use crate::error::{StudioError, StudioResult, TransportError};
use crate::models::StreamRequest;
use crate::sse::{FrameBuffer, SseEvent, SseParser};
use crate::traits::{Headers, HttpClient};

/// Item published on the transport → orchestrator channel.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A decoded frame, in wire order
    Event(SseEvent),
    /// A skipped frame (protocol) or the final failure after retries (transport)
    Error(StudioError),
}

/// Result of a single request attempt.
enum AttemptEnd {
    Finished,
    Cancelled,
    Failed(TransportError),
}

/// What the read loop should do after a frame.
enum Dispatch {
    Continue,
    Terminal,
    Stop,
}

/// Streaming client for the generation endpoint.
pub struct TransportClient<C: HttpClient> {
    http: Arc<C>,
    url: String,
    retry: RetryPolicy,
    status: TransportStatus,
}

impl<C: HttpClient> Clone for TransportClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            url: self.url.clone(),
            retry: self.retry,
            status: self.status.clone(),
        }
    }
}

impl<C: HttpClient> TransportClient<C> {
    pub fn new(http: Arc<C>, url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            http,
            url: url.into(),
            retry,
            status: TransportStatus::new(),
        }
    }

    /// Build a client from the endpoint and retry settings in `config`.
    pub fn from_config(http: Arc<C>, config: &StreamConfig) -> Self {
        Self::new(http, config.stream_url(), config.retry_policy())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared handle on the connected flag and retry counter.
    pub fn status(&self) -> &TransportStatus {
        &self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    pub fn retry_count(&self) -> u32 {
        self.status.retry_count()
    }

    /// Run one turn to completion, publishing events on `events_tx`.
    ///
    /// Returns `Ok` once the body ended or a terminal event was delivered,
    /// and [`StudioError::Cancelled`] when the token fired or the receiver
    /// went away. Any other error has already been published on `events_tx`.
    pub async fn start(
        &self,
        request: &StreamRequest,
        events_tx: mpsc::Sender<TransportEvent>,
        cancel: CancellationToken,
    ) -> StudioResult<()> {
        self.status.reset_retries();

        let body = match serde_json::to_string(request) {
            Ok(body) => body,
            Err(e) => {
                let err = TransportError::Other(format!("Failed to encode request: {}", e));
                error!("{}", err);
                return give_up(&events_tx, &cancel, err.into()).await;
            }
        };

        let mut attempt: u32 = 0;
        loop {
            let err = match self.attempt(&body, &events_tx, &cancel).await {
                AttemptEnd::Finished => return Ok(()),
                AttemptEnd::Cancelled => return Err(StudioError::Cancelled),
                AttemptEnd::Failed(err) => StudioError::from(err),
            };

            if cancel.is_cancelled() {
                debug!("Stream failed after cancellation, not retrying: {}", err);
                return Err(StudioError::Cancelled);
            }

            if !err.is_retryable() {
                error!("Stream failed with a permanent error ({}): {}", err.error_code(), err);
                return give_up(&events_tx, &cancel, err).await;
            }

            attempt += 1;
            if !self.retry.allows(attempt) {
                error!(
                    "Stream failed after {} retries, giving up: {}",
                    self.retry.max_retries, err
                );
                return give_up(&events_tx, &cancel, err).await;
            }

            let delay = self.retry.delay_for(attempt);
            self.status.record_retry();
            warn!(
                "Stream attempt failed ({}), retry {} of {} in {:?}",
                err, attempt, self.retry.max_retries, delay
            );

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Cancelled during backoff");
                    return Err(StudioError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn attempt(
        &self,
        body: &str,
        events_tx: &mpsc::Sender<TransportEvent>,
        cancel: &CancellationToken,
    ) -> AttemptEnd {
        let headers = stream_headers();
        let response = tokio::select! {
            _ = cancel.cancelled() => return AttemptEnd::Cancelled,
            response = self.http.post_stream(&self.url, body, &headers) => response,
        };

        let mut bytes = match response {
            Ok(bytes) => bytes,
            Err(e) => return AttemptEnd::Failed(e),
        };

        let _connected = self.status.connect();
        info!("Connected to {}", self.url);

        let mut frames = FrameBuffer::new();
        let mut parser = SseParser::new();

        loop {
            let chunk = tokio::select! {
                _ = cancel.cancelled() => return AttemptEnd::Cancelled,
                chunk = bytes.next() => chunk,
            };

            match chunk {
                Some(Ok(chunk)) => {
                    frames.push(&chunk);
                    while let Some(frame) = frames.next_frame() {
                        match dispatch(&mut parser, &frame, events_tx, cancel).await {
                            Dispatch::Continue => {}
                            Dispatch::Terminal => return AttemptEnd::Finished,
                            Dispatch::Stop => return AttemptEnd::Cancelled,
                        }
                    }
                }
                Some(Err(e)) => return AttemptEnd::Failed(e),
                None => {
                    if let Some(rest) = frames.take_remainder() {
                        if let Dispatch::Stop = dispatch(&mut parser, &rest, events_tx, cancel).await {
                            return AttemptEnd::Cancelled;
                        }
                    }
                    info!("Stream ended");
                    return AttemptEnd::Finished;
                }
            }
        }
    }
}

fn stream_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "text/event-stream".to_string());
    headers
}

/// Publish the final error and return it, unless the turn was cancelled first.
async fn give_up(
    events_tx: &mpsc::Sender<TransportEvent>,
    cancel: &CancellationToken,
    err: StudioError,
) -> StudioResult<()> {
    if publish(events_tx, cancel, TransportEvent::Error(err.clone())).await {
        Err(err)
    } else {
        Err(StudioError::Cancelled)
    }
}

/// Decode one frame and publish the result.
async fn dispatch(
    parser: &mut SseParser,
    frame: &str,
    events_tx: &mpsc::Sender<TransportEvent>,
    cancel: &CancellationToken,
) -> Dispatch {
    match parser.parse_frame(frame) {
        Ok(Some(event)) => {
            debug!("Decoded {} event", event.kind().as_str());
            let terminal = event.is_terminal();
            if !publish(events_tx, cancel, TransportEvent::Event(event)).await {
                return Dispatch::Stop;
            }
            if terminal {
                Dispatch::Terminal
            } else {
                Dispatch::Continue
            }
        }
        Ok(None) => Dispatch::Continue,
        Err(e) => {
            warn!("Skipping malformed {} frame: {}", e.event_type(), e);
            if publish(events_tx, cancel, TransportEvent::Error(e.into())).await {
                Dispatch::Continue
            } else {
                Dispatch::Stop
            }
        }
    }
}

/// Send respecting backpressure. False when cancelled or the receiver is gone.
async fn publish(
    events_tx: &mpsc::Sender<TransportEvent>,
    cancel: &CancellationToken,
    event: TransportEvent,
) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        sent = events_tx.send(event) => {
            if sent.is_err() {
                debug!("Event receiver dropped, stopping stream");
            }
            sent.is_ok()
        }
    }
}
