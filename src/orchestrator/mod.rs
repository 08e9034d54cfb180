//! Generation orchestrator.
//!
//! Owns the conversation and the per-session generation state, starts one
//! transport task per turn and folds its events into the assistant message.
//! The caller owns the orchestrator and drives it by awaiting
//! [`Orchestrator::next_update`], so every mutation happens on the caller's
//! task.
//!
//! ```ignore
//! let mut orchestrator = Orchestrator::new(&config, http, sessions, errors);
//! orchestrator.handle_send("a red fox at dawn", "flux-pro", GenerationMode::Managed)?;
//! while let Some(update) = orchestrator.next_update().await {
//!     render(&orchestrator, update);
//! }
//! ```

mod apply;
mod cancel;
mod send;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::StreamConfig;
use crate::models::{ChatMessage, MessageStatus};
use crate::sse::EventKind;
use crate::state::{Conversation, GenerationState, GenerationStore};
use crate::traits::{ErrorSink, HttpClient, SessionProvider};
use crate::transport::{TransportClient, TransportEvent, TransportStatus};

/// Lifecycle of the most recent turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TurnPhase {
    #[default]
    Idle,
    /// Request issued, no event applied yet
    Sending,
    Streaming,
    Completed,
    Cancelled,
    Errored,
}

impl TurnPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, TurnPhase::Sending | TurnPhase::Streaming)
    }
}

/// What a call to [`Orchestrator::next_update`] changed.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnUpdate {
    /// Assistant thought replaced
    Thought(String),
    /// Assistant content replaced
    Content(String),
    /// Artifact list, derived media urls and progress changed
    Artifacts,
    /// Recognized event without a state transition
    Ignored(EventKind),
    /// A frame was skipped; the error is in [`Orchestrator::error`]
    FrameError(String),
    /// The turn ended
    Finished(TurnPhase),
}

/// The turn currently in flight.
///
/// Dropping it fires the token, so the transport task never outlives the
/// orchestrator that started it.
struct ActiveTurn {
    session_id: String,
    assistant_id: String,
    cancel: CancellationToken,
    events: mpsc::Receiver<TransportEvent>,
}

impl Drop for ActiveTurn {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub struct Orchestrator<C: HttpClient + 'static> {
    transport: TransportClient<C>,
    sessions: Arc<dyn SessionProvider>,
    errors: Arc<dyn ErrorSink>,
    conversation: Conversation,
    generation: GenerationStore,
    error: Option<String>,
    phase: TurnPhase,
    active: Option<ActiveTurn>,
    channel_capacity: usize,
}

impl<C: HttpClient + 'static> Orchestrator<C> {
    pub fn new(
        config: &StreamConfig,
        http: Arc<C>,
        sessions: Arc<dyn SessionProvider>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            transport: TransportClient::from_config(http, config),
            sessions,
            errors,
            conversation: Conversation::new(),
            generation: GenerationStore::new(),
            error: None,
            phase: TurnPhase::Idle,
            active: None,
            channel_capacity: config.channel_capacity.max(1),
        }
    }

    /// Whether the current session has a turn in flight.
    pub fn is_generating(&self) -> bool {
        self.current_generation().is_generating
    }

    /// Progress (0-100) of the current session's turn.
    pub fn generation_progress(&self) -> u8 {
        self.current_generation().progress
    }

    /// Generation state of any session.
    pub fn generation_state(&self, session_id: &str) -> GenerationState {
        self.generation.get(session_id)
    }

    fn current_generation(&self) -> GenerationState {
        self.sessions
            .current_session_id()
            .map(|id| self.generation.get(&id))
            .unwrap_or_default()
    }

    /// Last error reported to the user, if not cleared.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> + '_ {
        self.conversation.iter()
    }

    pub fn message(&self, id: &str) -> Option<&ChatMessage> {
        self.conversation.get(id)
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn transport_status(&self) -> TransportStatus {
        self.transport.status().clone()
    }

    /// Apply the next transport event of the active turn.
    ///
    /// Returns `None` when no turn is in flight. Cancel-safe: dropping the
    /// future before it completes loses no event.
    pub async fn next_update(&mut self) -> Option<TurnUpdate> {
        let turn = self.active.as_mut()?;
        let received = turn.events.recv().await;

        let update = match received {
            Some(TransportEvent::Event(event)) => self.apply_event(event),
            Some(TransportEvent::Error(err)) => self.apply_error(err),
            None => {
                warn!("Stream closed without a done event, finishing turn");
                self.finish_turn(TurnPhase::Completed, None)
            }
        };
        Some(update)
    }

    /// Drive the active turn until it ends and return the final phase.
    pub async fn run_until_idle(&mut self) -> TurnPhase {
        while self.next_update().await.is_some() {}
        self.phase
    }

    /// Forget a session's generation state, cancelling its turn if in flight.
    pub fn discard_session(&mut self, session_id: &str) {
        let owns_active = self
            .active
            .as_ref()
            .is_some_and(|turn| turn.session_id == session_id);
        if owns_active {
            self.cancel_generation();
        }
        self.generation.remove(session_id);
    }

    /// End the active turn: stop the transport, settle the assistant message
    /// and reset the generation flag.
    fn finish_turn(&mut self, phase: TurnPhase, error: Option<String>) -> TurnUpdate {
        let Some(turn) = self.active.take() else {
            return TurnUpdate::Finished(self.phase);
        };
        turn.cancel.cancel();

        if let Some(message) = self.conversation.get_mut(&turn.assistant_id) {
            message.thought = None;
            message.status = match phase {
                TurnPhase::Errored => MessageStatus::Error,
                _ => MessageStatus::Complete,
            };
        }
        self.generation.update(&turn.session_id, |state| state.finish());

        if let Some(message) = error {
            self.report_error(message);
        }
        self.phase = phase;
        tracing::info!("Turn finished: {:?}", phase);
        TurnUpdate::Finished(phase)
    }

    fn report_error(&mut self, message: String) {
        self.errors.add_error(&message);
        self.error = Some(message);
    }
}
