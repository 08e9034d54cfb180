//! Reqwest-based HTTP client adapter.
//!
//! Production implementation of [`HttpClient`] on top of `reqwest`'s
//! streaming response body.

use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

use crate::error::TransportError;
use crate::traits::{ByteStream, Headers, HttpClient};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use studio_stream::adapters::ReqwestHttpClient;
/// use studio_stream::traits::{Headers, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let body = client.post_stream("http://localhost:8000/api/generate/stream", "{}", &Headers::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a client whose connection phase is bounded by `timeout`.
    ///
    /// Only the connect phase is bounded: a generation stream may legitimately
    /// stay open for minutes.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(Self::convert_error)?;
        Ok(Self { client })
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert reqwest error to TransportError.
    fn convert_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::ConnectionFailed(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Io(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError> {
        let builder = self.client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);

        let response = builder.send().await.map_err(Self::convert_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::HttpStatus { status, message });
        }

        let stream = response.bytes_stream().map(|result| {
            result.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(e.to_string())
                } else {
                    TransportError::Io(e.to_string())
                }
            })
        });

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_http_client_default() {
        let client = ReqwestHttpClient::default();
        let _ = client.inner();
    }

    #[test]
    fn test_with_connect_timeout() {
        let client = ReqwestHttpClient::with_connect_timeout(Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_apply_headers() {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        let client = reqwest::Client::new();
        let builder = client.post("https://example.com");
        let request = ReqwestHttpClient::apply_headers(builder, &headers)
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("accept").unwrap(),
            "text/event-stream"
        );
    }

    #[tokio::test]
    async fn test_post_stream_connection_refused() {
        let client = ReqwestHttpClient::new();
        let result = client
            .post_stream("http://127.0.0.1:59999/stream", "{}", &Headers::new())
            .await;
        assert!(matches!(
            result,
            Err(TransportError::ConnectionFailed(_)) | Err(TransportError::Other(_))
        ));
    }
}
