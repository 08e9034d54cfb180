//! Protocol-level error types.
//!
//! A frame arrived intact but its payload could not be decoded. These are
//! reported through the error channel and the stream keeps going.

use thiserror::Error;

/// Failure decoding a single SSE frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// `data:` payload is not valid JSON for the event type.
    #[error("Invalid JSON for event '{event_type}': {message}")]
    InvalidJson { event_type: String, message: String },

    /// Event type requires a payload but the frame carried none.
    #[error("Missing data for event type: {event_type}")]
    MissingData { event_type: String },
}

impl ProtocolError {
    /// Event type tag of the offending frame.
    pub fn event_type(&self) -> &str {
        match self {
            ProtocolError::InvalidJson { event_type, .. } => event_type,
            ProtocolError::MissingData { event_type } => event_type,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        format!(
            "Received an unreadable '{}' update from the server.",
            self.event_type()
        )
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProtocolError::InvalidJson { .. } => "E_STREAM_JSON",
            ProtocolError::MissingData { .. } => "E_STREAM_NODATA",
        }
    }
}
