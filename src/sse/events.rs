//! SSE event type definitions.

use serde_json::Value;

use super::payloads::{ArtifactPayload, ArtifactStatusPayload};

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: artifact")
    Event(String),
    /// Data payload (e.g., "data: {\"desc\": \"...\"}")
    Data(String),
    /// Empty line - signals end of event
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
}

/// The fixed set of event type tags the backend sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Thought,
    Data,
    Message,
    Asset,
    GenerateRequest,
    Artifact,
    ArtifactStatus,
    Error,
    Done,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::Thought,
        EventKind::Data,
        EventKind::Message,
        EventKind::Asset,
        EventKind::GenerateRequest,
        EventKind::Artifact,
        EventKind::ArtifactStatus,
        EventKind::Error,
        EventKind::Done,
    ];

    /// Exact match against the recognized tags.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Normalize a tag: anything unrecognized is treated as `message`.
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag.trim()).unwrap_or(EventKind::Message)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Thought => "thought",
            EventKind::Data => "data",
            EventKind::Message => "message",
            EventKind::Asset => "asset",
            EventKind::GenerateRequest => "generate_request",
            EventKind::Artifact => "artifact",
            EventKind::ArtifactStatus => "artifact_status",
            EventKind::Error => "error",
            EventKind::Done => "done",
        }
    }
}

/// Typed events of a generation turn
#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    /// Replaceable "thinking" status text
    Thought { desc: String },
    /// Full assistant text so far (replacement, not a delta)
    Message { text: String },
    /// New artifact announced
    Artifact(ArtifactPayload),
    /// Status batch for known artifacts
    ArtifactStatus(ArtifactStatusPayload),
    /// Backend failure; ends the turn
    Error { message: String },
    /// Turn finished
    Done,
    /// Recognized but carries no state transition
    Data(Value),
    Asset(Value),
    GenerateRequest(Value),
}

impl SseEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SseEvent::Thought { .. } => EventKind::Thought,
            SseEvent::Message { .. } => EventKind::Message,
            SseEvent::Artifact(_) => EventKind::Artifact,
            SseEvent::ArtifactStatus(_) => EventKind::ArtifactStatus,
            SseEvent::Error { .. } => EventKind::Error,
            SseEvent::Done => EventKind::Done,
            SseEvent::Data(_) => EventKind::Data,
            SseEvent::Asset(_) => EventKind::Asset,
            SseEvent::GenerateRequest(_) => EventKind::GenerateRequest,
        }
    }

    /// Whether this event ends the turn.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SseEvent::Error { .. } | SseEvent::Done)
    }
}
