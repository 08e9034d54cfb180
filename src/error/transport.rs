//! Transport-level error types.
//!
//! Failures to open or read the streaming HTTP response. The transport
//! client retries them until its retry budget runs out, except for client
//! errors that a repeated request cannot fix.

use thiserror::Error;

/// Failure opening or reading the generation stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection to the server failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request or read timed out.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    HttpStatus { status: u16, message: String },

    /// Body read failed mid-stream.
    #[error("IO error: {0}")]
    Io(String),

    /// Anything else reported by the HTTP layer.
    #[error("HTTP error: {0}")]
    Other(String),
}

impl TransportError {
    /// Check if repeating the same request may succeed.
    ///
    /// A 4xx status is permanent, apart from 408 and 429.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::HttpStatus { status, .. } => {
                !(400..500).contains(status) || matches!(status, 408 | 429)
            }
            _ => true,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::ConnectionFailed(_) => {
                "Unable to connect to the generation server. Please check your connection.".to_string()
            }
            TransportError::Timeout(_) => {
                "The generation server did not respond in time. Please try again.".to_string()
            }
            TransportError::HttpStatus { status, .. } => match *status {
                401 => "Authentication required. Please sign in again.".to_string(),
                403 => "Access denied for this generation request.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The generation server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            TransportError::Io(_) => "The generation stream was interrupted.".to_string(),
            TransportError::Other(message) => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed(_) => "E_NET_CONN",
            TransportError::Timeout(_) => "E_NET_TIMEOUT",
            TransportError::HttpStatus { .. } => "E_NET_HTTP",
            TransportError::Io(_) => "E_NET_IO",
            TransportError::Other(_) => "E_NET_OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            TransportError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            TransportError::HttpStatus {
                status: 503,
                message: "unavailable".to_string()
            }
            .to_string(),
            "Server error (503): unavailable"
        );
        assert_eq!(
            TransportError::Io("reset".to_string()).to_string(),
            "IO error: reset"
        );
    }

    #[test]
    fn test_network_failures_are_retryable() {
        let errors = [
            TransportError::ConnectionFailed("x".to_string()),
            TransportError::Timeout("x".to_string()),
            TransportError::Io("x".to_string()),
            TransportError::Other("x".to_string()),
        ];
        for err in errors {
            assert!(err.is_retryable(), "{:?} should be retryable", err);
        }
    }

    #[test]
    fn test_client_status_is_permanent() {
        let status = |status: u16| TransportError::HttpStatus {
            status,
            message: "x".to_string(),
        };
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(status(408).is_retryable());
        assert!(status(429).is_retryable());
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
    }

    #[test]
    fn test_http_status_user_messages() {
        let err = TransportError::HttpStatus {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert!(err.user_message().contains("experiencing issues"));

        let err = TransportError::HttpStatus {
            status: 418,
            message: "teapot".to_string(),
        };
        assert!(err.user_message().contains("418"));
        assert_eq!(err.error_code(), "E_NET_HTTP");
    }
}
