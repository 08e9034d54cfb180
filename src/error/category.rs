//! Error category classification for unified error handling.
//!
//! Categories drive the handling decision for an error: whether the
//! transport may retry it, whether it ends the turn, and whether the user
//! ever sees it.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, HTTP status and read failures.
    /// Transient; retried with backoff.
    Network,

    /// Malformed frames on an otherwise healthy stream.
    /// Reported but never retried.
    Protocol,

    /// The backend reported a failure through a well-formed `error` event.
    Server,

    /// Caller misuse (empty input, missing session, overlapping turns).
    User,

    /// Deliberate cancellation. Never shown to the user.
    Cancelled,
}

impl ErrorCategory {
    /// Returns true if errors in this category can be retried by the transport.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Returns true if errors in this category should reach the error sink.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ErrorCategory::Cancelled)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Protocol => "protocol",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
            ErrorCategory::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_is_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(!ErrorCategory::Protocol.is_retryable());
        assert!(!ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
        assert!(!ErrorCategory::Cancelled.is_retryable());
    }

    #[test]
    fn test_cancelled_is_not_user_facing() {
        assert!(!ErrorCategory::Cancelled.is_user_facing());
        assert!(ErrorCategory::Server.is_user_facing());
        assert!(ErrorCategory::Network.is_user_facing());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCategory::Protocol.to_string(), "protocol");
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
    }
}
