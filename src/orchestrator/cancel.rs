//! Cancelling the active turn.
//!
//! Local state is reconciled immediately instead of waiting for the transport
//! to wind down, so the caller sees a settled message as soon as
//! `cancel_generation` returns.

use tracing::{debug, info};

use super::{Orchestrator, TurnPhase};
use crate::models::MessageStatus;
use crate::traits::HttpClient;

impl<C: HttpClient + 'static> Orchestrator<C> {
    /// Cancel the active turn if one is running.
    ///
    /// Fires the turn's cancellation token (stopping the request, the read
    /// loop or a backoff wait), then:
    /// - clears the assistant's thought
    /// - marks every unfinished artifact as failed
    /// - recomputes the derived media urls
    /// - resets the session's generation flag and progress
    ///
    /// Returns false and does nothing when no turn is in flight.
    pub fn cancel_generation(&mut self) -> bool {
        let Some(turn) = self.active.take() else {
            debug!("Nothing to cancel");
            return false;
        };
        turn.cancel.cancel();

        if let Some(message) = self.conversation.get_mut(&turn.assistant_id) {
            message.thought = None;
            let mut failed = 0;
            for artifact in message.artifacts.iter_mut() {
                if artifact.fail_if_unfinished() {
                    failed += 1;
                }
            }
            message.refresh_media_urls();
            message.status = MessageStatus::Complete;
            debug!("Marked {} unfinished artifacts as failed", failed);
        }

        self.generation.update(&turn.session_id, |state| state.finish());
        self.phase = TurnPhase::Cancelled;
        info!("Generation cancelled in session {}", turn.session_id);
        true
    }
}
