//! HTTP client trait abstraction.
//!
//! The transport only ever needs one operation: POST a JSON body and read
//! the response incrementally. Keeping it behind a trait lets tests script
//! failures and chunk boundaries without a network.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

use crate::error::TransportError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Incrementally read response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Trait for streaming HTTP requests.
///
/// # Example
///
/// ```ignore
/// use studio_stream::traits::{Headers, HttpClient};
///
/// async fn first_chunk<C: HttpClient>(client: &C) -> Option<bytes::Bytes> {
///     let mut body = client.post_stream("http://localhost:8000/stream", "{}", &Headers::new()).await.ok()?;
///     body.next().await?.ok()
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response body as a stream.
    ///
    /// A non-2xx status must be reported as [`TransportError::HttpStatus`]
    /// before any body is returned.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError>;
}
