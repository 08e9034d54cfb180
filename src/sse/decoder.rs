//! Event decoding: tag normalization plus JSON payload decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::events::{EventKind, SseEvent};
use super::payloads::{ErrorPayload, MessagePayload, ThoughtPayload};
use crate::error::ProtocolError;

/// Decode one frame's tag and joined `data:` payload into a typed event.
///
/// A missing or unrecognized tag decodes as `message`. `done` tolerates an
/// empty payload; every other event requires one.
pub fn decode_event(tag: Option<&str>, data: &str) -> Result<SseEvent, ProtocolError> {
    let kind = tag.map(EventKind::from_tag).unwrap_or(EventKind::Message);

    if data.trim().is_empty() {
        return match kind {
            EventKind::Done => Ok(SseEvent::Done),
            _ => Err(ProtocolError::MissingData {
                event_type: kind.as_str().to_string(),
            }),
        };
    }

    let event = match kind {
        EventKind::Thought => {
            let payload: ThoughtPayload = from_json(kind, data)?;
            SseEvent::Thought { desc: payload.desc }
        }
        EventKind::Message => {
            let payload: MessagePayload = from_json(kind, data)?;
            SseEvent::Message { text: payload.text }
        }
        EventKind::Artifact => SseEvent::Artifact(from_json(kind, data)?),
        EventKind::ArtifactStatus => SseEvent::ArtifactStatus(from_json(kind, data)?),
        EventKind::Error => {
            let payload: ErrorPayload = from_json(kind, data)?;
            SseEvent::Error {
                message: payload.message,
            }
        }
        EventKind::Done => {
            // payload is `{}`; still reject garbage
            from_json::<Value>(kind, data)?;
            SseEvent::Done
        }
        EventKind::Data => SseEvent::Data(from_json(kind, data)?),
        EventKind::Asset => SseEvent::Asset(from_json(kind, data)?),
        EventKind::GenerateRequest => SseEvent::GenerateRequest(from_json(kind, data)?),
    };

    Ok(event)
}

fn from_json<T: DeserializeOwned>(kind: EventKind, data: &str) -> Result<T, ProtocolError> {
    serde_json::from_str(data).map_err(|e| ProtocolError::InvalidJson {
        event_type: kind.as_str().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactStatus;

    #[test]
    fn test_decode_thought() {
        let event = decode_event(Some("thought"), r#"{"desc":"Sketching"}"#).unwrap();
        assert_eq!(
            event,
            SseEvent::Thought {
                desc: "Sketching".to_string()
            }
        );
    }

    #[test]
    fn test_decode_artifact() {
        let event =
            decode_event(Some("artifact"), r#"{"id":"a1","type":"image","status":"pending"}"#)
                .unwrap();
        match event {
            SseEvent::Artifact(payload) => {
                assert_eq!(payload.id, "a1");
                assert_eq!(payload.kind, "image");
                assert_eq!(payload.status, ArtifactStatus::Pending);
            }
            other => panic!("Expected Artifact, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_decodes_as_message() {
        let event = decode_event(Some("content_delta"), r#"{"text":"hi"}"#).unwrap();
        assert_eq!(
            event,
            SseEvent::Message {
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_missing_tag_decodes_as_message() {
        let event = decode_event(None, r#"{"text":"hi"}"#).unwrap();
        assert_eq!(event.kind(), EventKind::Message);
    }

    #[test]
    fn test_done_without_data() {
        assert_eq!(decode_event(Some("done"), "").unwrap(), SseEvent::Done);
        assert_eq!(decode_event(Some("done"), "{}").unwrap(), SseEvent::Done);
    }

    #[test]
    fn test_missing_data_is_protocol_error() {
        let err = decode_event(Some("thought"), "  ").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::MissingData {
                event_type: "thought".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_json_reports_normalized_tag() {
        let err = decode_event(Some("mystery"), "not json").unwrap_err();
        match err {
            ProtocolError::InvalidJson { event_type, .. } => assert_eq!(event_type, "message"),
            other => panic!("Expected InvalidJson, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shape_is_invalid_json() {
        let err = decode_event(Some("message"), r#"{"desc":"no text field"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidJson { .. }));
    }

    #[test]
    fn test_passthrough_events_keep_raw_json() {
        let event = decode_event(Some("generate_request"), r#"{"prompt":"fox"}"#).unwrap();
        assert_eq!(
            event,
            SseEvent::GenerateRequest(serde_json::json!({"prompt": "fox"}))
        );
    }
}
