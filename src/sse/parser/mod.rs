//! SSE stream parsing logic
//!
//! Contains the stateful SseParser for accumulating lines and emitting events,
//! the frame splitter for raw body chunks, and the line parser.

mod frame;

pub use frame::FrameBuffer;

use crate::error::ProtocolError;
use crate::sse::decoder::decode_event;
use crate::sse::events::{SseEvent, SseLine};

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        // A single leading space belongs to the field separator
        return SseLine::Data(rest.strip_prefix(' ').unwrap_or(rest).to_string());
    }

    // Unknown field (id:, retry:, ...) - not used by this protocol
    SseLine::Comment(line.to_string())
}

/// Stateful SSE parser that accumulates lines and emits complete events
#[derive(Debug, Default)]
pub struct SseParser {
    /// Current event type being accumulated
    current_event_type: Option<String>,
    /// Accumulated data lines (SSE allows multiple data: lines)
    data_buffer: Vec<String>,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, potentially returning a complete event
    ///
    /// Returns:
    /// - `Ok(Some(event))` - A complete event was parsed
    /// - `Ok(None)` - Line was consumed but event is incomplete
    /// - `Err(error)` - The completed frame could not be decoded
    pub fn feed_line(&mut self, line: &str) -> Result<Option<SseEvent>, ProtocolError> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.current_event_type = Some(event_type);
                Ok(None)
            }
            SseLine::Data(data) => {
                self.data_buffer.push(data);
                Ok(None)
            }
            SseLine::Empty => self.try_emit_event(),
            SseLine::Comment(_) => Ok(None),
        }
    }

    /// Parse one complete frame (the text between two blank lines).
    ///
    /// Any state left over from a previous frame is discarded first.
    pub fn parse_frame(&mut self, frame: &str) -> Result<Option<SseEvent>, ProtocolError> {
        self.reset();
        for line in frame.lines() {
            // lines inside a frame are never empty, but be tolerant of stray ones
            if line.is_empty() {
                continue;
            }
            self.feed_line(line)?;
        }
        self.try_emit_event()
    }

    /// Try to emit a complete event from accumulated state
    fn try_emit_event(&mut self) -> Result<Option<SseEvent>, ProtocolError> {
        // Comment-only frames (keep-alives) carry nothing
        if self.current_event_type.is_none() && self.data_buffer.is_empty() {
            return Ok(None);
        }

        let event_type = self.current_event_type.take();
        let data = self.data_buffer.join("\n");
        self.data_buffer.clear();

        decode_event(event_type.as_deref(), &data).map(Some)
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.current_event_type = None;
        self.data_buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactStatus;

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(
            parse_sse_line(": keep-alive"),
            SseLine::Comment("keep-alive".to_string())
        );
    }

    #[test]
    fn test_parse_event_line() {
        assert_eq!(
            parse_sse_line("event: artifact_status"),
            SseLine::Event("artifact_status".to_string())
        );
        assert_eq!(
            parse_sse_line("event:done"),
            SseLine::Event("done".to_string())
        );
    }

    #[test]
    fn test_parse_data_line_strips_one_space() {
        assert_eq!(
            parse_sse_line("data: {\"x\":1}"),
            SseLine::Data("{\"x\":1}".to_string())
        );
        assert_eq!(
            parse_sse_line("data:{\"x\":1}"),
            SseLine::Data("{\"x\":1}".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_field_is_comment() {
        assert_eq!(
            parse_sse_line("id: 42"),
            SseLine::Comment("id: 42".to_string())
        );
    }

    #[test]
    fn test_parser_simple_event() {
        let mut parser = SseParser::new();

        assert!(parser.feed_line("event: thought").unwrap().is_none());
        assert!(parser
            .feed_line(r#"data: {"desc": "Thinking..."}"#)
            .unwrap()
            .is_none());

        let event = parser.feed_line("").unwrap();
        assert_eq!(
            event,
            Some(SseEvent::Thought {
                desc: "Thinking...".to_string()
            })
        );
    }

    #[test]
    fn test_parser_multiple_data_lines_are_joined() {
        let mut parser = SseParser::new();
        let frame = "event: artifact_status\ndata: {\"artifacts\": [\ndata: {\"id\": \"a1\", \"status\": \"processing\"}\ndata: ], \"all_done\": false}";
        match parser.parse_frame(frame).unwrap() {
            Some(SseEvent::ArtifactStatus(payload)) => {
                assert_eq!(payload.artifacts.len(), 1);
                assert_eq!(payload.artifacts[0].status, ArtifactStatus::Processing);
            }
            other => panic!("Expected ArtifactStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_frame_comment_only() {
        let mut parser = SseParser::new();
        assert!(parser.parse_frame(": ping").unwrap().is_none());
    }

    #[test]
    fn test_parse_frame_done_without_data() {
        let mut parser = SseParser::new();
        assert_eq!(parser.parse_frame("event: done").unwrap(), Some(SseEvent::Done));
    }

    #[test]
    fn test_parse_frame_crlf_lines() {
        let mut parser = SseParser::new();
        let event = parser
            .parse_frame("event: message\r\ndata: {\"text\":\"hi\"}")
            .unwrap();
        assert_eq!(
            event,
            Some(SseEvent::Message {
                text: "hi".to_string()
            })
        );
    }

    #[test]
    fn test_parse_frame_invalid_json() {
        let mut parser = SseParser::new();
        let result = parser.parse_frame("event: artifact\ndata: {broken");
        assert!(matches!(result, Err(ProtocolError::InvalidJson { .. })));
    }

    #[test]
    fn test_parser_state_does_not_leak_after_error() {
        let mut parser = SseParser::new();
        assert!(parser.parse_frame("event: thought\ndata: nope").is_err());
        let event = parser.parse_frame("data: {\"text\":\"ok\"}").unwrap();
        assert_eq!(
            event,
            Some(SseEvent::Message {
                text: "ok".to_string()
            })
        );
    }

    #[test]
    fn test_parser_reset() {
        let mut parser = SseParser::new();

        parser.feed_line("event: thought").unwrap();
        parser.feed_line(r#"data: {"desc": "x"}"#).unwrap();
        parser.reset();

        assert!(parser.feed_line("").unwrap().is_none());
    }

    #[test]
    fn test_realistic_stream_through_frame_buffer() {
        let body = concat!(
            ": connected\n\n",
            "event: thought\ndata: {\"desc\":\"Thinking...\"}\n\n",
            "event: artifact\ndata: {\"id\":\"a1\",\"type\":\"image\",\"status\":\"pending\"}\n\n",
            "event: artifact_status\ndata: {\"artifacts\":[{\"id\":\"a1\",\"status\":\"completed\",\"url\":\"http://img.url\"}],\"all_done\":true}\n\n",
            "event: done\ndata: {}\n\n",
        );

        let mut buffer = FrameBuffer::new();
        let mut parser = SseParser::new();
        let mut events = Vec::new();

        // feed in awkward 7-byte chunks
        for chunk in body.as_bytes().chunks(7) {
            buffer.push(chunk);
            while let Some(frame) = buffer.next_frame() {
                if let Some(event) = parser.parse_frame(&frame).unwrap() {
                    events.push(event);
                }
            }
        }

        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], SseEvent::Thought { .. }));
        assert!(matches!(events[1], SseEvent::Artifact(_)));
        assert!(matches!(events[2], SseEvent::ArtifactStatus(_)));
        assert_eq!(events[3], SseEvent::Done);
        assert!(buffer.take_remainder().is_none());
    }
}
