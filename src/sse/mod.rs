//! SSE (Server-Sent Events) stream parser
//!
//! Parses the generation backend's streaming format:
//! - `event: <type>` - event type line
//! - `data: <json>` - data payload line(s), joined with `\n`
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `events` - Event type definitions (SseEvent, EventKind, SseLine)
//! - `payloads` - Payload deserialization structs
//! - `decoder` - Tag normalization and JSON decoding
//! - `parser` - Frame splitting and line accumulation

mod decoder;
mod events;
mod parser;
mod payloads;

pub use decoder::decode_event;
pub use events::{EventKind, SseEvent, SseLine};
pub use parser::{parse_sse_line, FrameBuffer, SseParser};
pub use payloads::{ArtifactPayload, ArtifactStatusEntry, ArtifactStatusPayload};
