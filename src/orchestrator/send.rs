//! Starting a turn.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{ActiveTurn, Orchestrator, TurnPhase};
use crate::error::{StudioError, StudioResult};
use crate::models::{ChatMessage, GenerationMode, StreamRequest};
use crate::traits::HttpClient;

impl<C: HttpClient + 'static> Orchestrator<C> {
    /// Send a prompt and start streaming the reply.
    ///
    /// Appends the user message and an empty assistant placeholder before any
    /// event arrives, then starts the transport in a background task. Returns
    /// the placeholder's id.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`StudioError::EmptyInput`] if `input` is blank
    /// - [`StudioError::NoSession`] if no session is selected
    /// - [`StudioError::TurnInFlight`] if a turn is still streaming
    ///
    /// Nothing is appended in any of these cases.
    pub fn handle_send(
        &mut self,
        input: &str,
        model_id: &str,
        mode: GenerationMode,
    ) -> StudioResult<String> {
        let content = input.trim();
        if content.is_empty() {
            return Err(StudioError::EmptyInput);
        }
        let session_id = self
            .sessions
            .current_session_id()
            .ok_or(StudioError::NoSession)?;
        if self.active.is_some() {
            return Err(StudioError::TurnInFlight);
        }

        self.sessions.touch_session(&session_id);
        self.error = None;

        let user = ChatMessage::user(content);
        let assistant = ChatMessage::assistant_placeholder(model_id);
        let assistant_id = assistant.id.clone();
        self.conversation.push(user);
        self.conversation.push(assistant);

        self.generation.update(&session_id, |state| state.begin());
        self.phase = TurnPhase::Sending;

        let request = StreamRequest::new(&session_id, content, model_id, mode);
        let (events_tx, events_rx) = mpsc::channel(self.channel_capacity);
        let cancel = CancellationToken::new();

        let transport = self.transport.clone();
        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            match transport.start(&request, events_tx, task_cancel).await {
                Ok(()) => debug!("Transport finished"),
                Err(err) if !err.category().is_user_facing() => {
                    debug!("Transport stopped: {}", err)
                }
                Err(err) => debug!("Transport failed ({}): {}", err.error_code(), err),
            }
        });

        info!(
            "Started {:?} turn in session {} with model {}",
            mode, session_id, model_id
        );

        self.active = Some(ActiveTurn {
            session_id,
            assistant_id: assistant_id.clone(),
            cancel,
            events: events_rx,
        });
        Ok(assistant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::adapters::mock::MockResponse;
    use crate::error::StudioError;
    use crate::models::{GenerationMode, MessageRole, MessageStatus};
    use crate::orchestrator::TurnPhase;

    #[tokio::test]
    async fn test_send_appends_exactly_two_messages() {
        let mut h = harness();
        h.http.push_response(MockResponse::StreamThenHang(vec![]));

        let assistant_id = h
            .orchestrator
            .handle_send("a red fox", "flux-pro", GenerationMode::Managed)
            .unwrap();

        let messages: Vec<_> = h.orchestrator.messages().collect();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "a red fox");
        assert_eq!(messages[1].id, assistant_id);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].status, MessageStatus::Pending);
        assert_eq!(messages[1].model_used.as_deref(), Some("flux-pro"));

        assert_eq!(h.orchestrator.phase(), TurnPhase::Sending);
        assert!(h.orchestrator.is_generating());
        assert_eq!(h.orchestrator.generation_progress(), 0);
        assert_eq!(h.session.touch_count(), 1);
        h.orchestrator.cancel_generation();
    }

    #[tokio::test]
    async fn test_request_payload() {
        let mut h = harness();
        h.http.push_response(MockResponse::sse(&[&frame("done", "{}")]));

        h.orchestrator
            .handle_send("  a red fox  ", "flux-pro", GenerationMode::Chat)
            .unwrap();
        h.orchestrator.run_until_idle().await;

        let requests = h.http.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://studio.test/api/generate/stream");
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "session_id": SESSION,
                "content": "a red fox",
                "model": "flux-pro",
                "mode": "chat"
            })
        );
    }

    #[tokio::test]
    async fn test_second_send_while_streaming_is_rejected() {
        let mut h = harness();
        h.http.push_response(MockResponse::StreamThenHang(vec![]));

        h.orchestrator
            .handle_send("first", "m", GenerationMode::Managed)
            .unwrap();
        let result = h
            .orchestrator
            .handle_send("second", "m", GenerationMode::Managed);

        assert_eq!(result, Err(StudioError::TurnInFlight));
        assert_eq!(h.orchestrator.messages().count(), 2);
        assert_eq!(h.session.touch_count(), 1);
        h.orchestrator.cancel_generation();
    }

    #[tokio::test]
    async fn test_send_from_another_session_is_rejected_while_streaming() {
        let mut h = harness();
        h.http.push_response(MockResponse::StreamThenHang(vec![]));

        h.orchestrator
            .handle_send("first", "m", GenerationMode::Managed)
            .unwrap();
        h.session.select(Some("sess-2".to_string()));
        let err = h
            .orchestrator
            .handle_send("elsewhere", "m", GenerationMode::Managed)
            .unwrap_err();

        assert_eq!(err, StudioError::TurnInFlight);
        assert!(!err.to_string().contains("session"));
        assert_eq!(h.orchestrator.messages().count(), 2);
        assert!(h.orchestrator.generation_state(SESSION).is_generating);
        h.orchestrator.cancel_generation();
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected() {
        let mut h = harness();
        let result = h.orchestrator.handle_send("   \n", "m", GenerationMode::Managed);
        assert_eq!(result, Err(StudioError::EmptyInput));
        assert_eq!(h.orchestrator.messages().count(), 0);
        assert_eq!(h.http.request_count(), 0);
    }

    #[tokio::test]
    async fn test_no_session_is_rejected() {
        let mut h = harness();
        h.session.select(None);
        let result = h.orchestrator.handle_send("hi", "m", GenerationMode::Managed);
        assert_eq!(result, Err(StudioError::NoSession));
        assert_eq!(h.orchestrator.messages().count(), 0);
    }

    #[tokio::test]
    async fn test_send_clears_previous_error() {
        let mut h = harness();
        h.http.push_response(MockResponse::sse(&[&frame(
            "error",
            r#"{"message":"quota exceeded"}"#,
        )]));
        h.http.push_response(MockResponse::sse(&[&frame("done", "{}")]));

        h.orchestrator
            .handle_send("one", "m", GenerationMode::Managed)
            .unwrap();
        h.orchestrator.run_until_idle().await;
        assert_eq!(h.orchestrator.error(), Some("quota exceeded"));

        h.orchestrator
            .handle_send("two", "m", GenerationMode::Managed)
            .unwrap();
        assert!(h.orchestrator.error().is_none());
        assert_eq!(h.orchestrator.run_until_idle().await, TurnPhase::Completed);
    }
}
