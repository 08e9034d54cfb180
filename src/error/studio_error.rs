//! Unified error type for the generation pipeline.

use thiserror::Error;

use super::category::ErrorCategory;
use super::protocol::ProtocolError;
use super::transport::TransportError;

/// Unified error type for the generation pipeline.
///
/// Every failure the orchestrator can observe is one of these, which keeps
/// categorization, retry decisions and user messaging in one place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudioError {
    /// HTTP or network failure before or during streaming.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Malformed frame payload.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Well-formed `error` event from the server.
    #[error("Backend error: {message}")]
    Application { message: String },

    /// Deliberate abort of the turn.
    #[error("Generation cancelled")]
    Cancelled,

    /// A turn is already streaming on this orchestrator.
    #[error("A generation is already in progress")]
    TurnInFlight,

    /// No session is selected.
    #[error("No active session")]
    NoSession,

    /// Input was empty or whitespace.
    #[error("Input is empty")]
    EmptyInput,
}

impl StudioError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StudioError::Transport(_) => ErrorCategory::Network,
            StudioError::Protocol(_) => ErrorCategory::Protocol,
            StudioError::Application { .. } => ErrorCategory::Server,
            StudioError::Cancelled => ErrorCategory::Cancelled,
            StudioError::TurnInFlight | StudioError::NoSession | StudioError::EmptyInput => {
                ErrorCategory::User
            }
        }
    }

    /// Check if the transport may retry this error.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
            && matches!(self, StudioError::Transport(err) if err.is_retryable())
    }

    /// Check if this error ends the turn it occurred in.
    ///
    /// Protocol errors only skip the offending frame.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StudioError::Protocol(_))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::Transport(err) => err.user_message(),
            StudioError::Protocol(err) => err.user_message(),
            StudioError::Application { message } => message.clone(),
            StudioError::Cancelled => "Generation was cancelled.".to_string(),
            StudioError::TurnInFlight => {
                "Please wait for the current generation to finish before sending another message."
                    .to_string()
            }
            StudioError::NoSession => "Select or create a session first.".to_string(),
            StudioError::EmptyInput => "Type a prompt before sending.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StudioError::Transport(err) => err.error_code(),
            StudioError::Protocol(err) => err.error_code(),
            StudioError::Application { .. } => "E_STREAM_BACKEND",
            StudioError::Cancelled => "E_CANCELLED",
            StudioError::TurnInFlight => "E_TURN_BUSY",
            StudioError::NoSession => "E_NO_SESSION",
            StudioError::EmptyInput => "E_EMPTY_INPUT",
        }
    }
}
