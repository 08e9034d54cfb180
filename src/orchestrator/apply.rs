//! Folding transport events into the assistant message.

use tracing::{debug, warn};

use super::{Orchestrator, TurnPhase, TurnUpdate};
use crate::error::StudioError;
use crate::models::ChatMessage;
use crate::sse::SseEvent;
use crate::traits::HttpClient;

impl<C: HttpClient + 'static> Orchestrator<C> {
    pub(super) fn apply_event(&mut self, event: SseEvent) -> TurnUpdate {
        if self.phase == TurnPhase::Sending {
            self.phase = TurnPhase::Streaming;
        }
        let kind = event.kind();
        debug!("Applying {} event", kind.as_str());

        match event {
            SseEvent::Thought { desc } => {
                self.update_assistant(|message| message.thought = Some(desc.clone()));
                TurnUpdate::Thought(desc)
            }
            SseEvent::Message { text } => {
                // full replacement, so a replayed frame is harmless
                self.update_assistant(|message| message.content = text.clone());
                TurnUpdate::Content(text)
            }
            SseEvent::Artifact(payload) => {
                self.update_artifacts(|message| message.upsert_artifact(payload.into_artifact()));
                TurnUpdate::Artifacts
            }
            SseEvent::ArtifactStatus(payload) => {
                if payload.all_done {
                    debug!("Backend reports all artifacts done");
                }
                self.update_artifacts(|message| {
                    for entry in payload.artifacts {
                        match message.artifact_mut(&entry.id) {
                            Some(artifact) => {
                                if !artifact.apply_status(entry.status, entry.url) {
                                    debug!(
                                        "Ignoring {:?} for artifact {} already {:?}",
                                        entry.status, entry.id, artifact.status
                                    );
                                }
                            }
                            None => warn!("Status update for unknown artifact {}", entry.id),
                        }
                    }
                });
                TurnUpdate::Artifacts
            }
            SseEvent::Error { message } => {
                let err = StudioError::Application { message };
                warn!("{}", err);
                self.finish_turn(TurnPhase::Errored, Some(err.user_message()))
            }
            SseEvent::Done => self.finish_turn(TurnPhase::Completed, None),
            SseEvent::Data(_) | SseEvent::Asset(_) | SseEvent::GenerateRequest(_) => {
                debug!("No transition for {} event", kind.as_str());
                TurnUpdate::Ignored(kind)
            }
        }
    }

    pub(super) fn apply_error(&mut self, err: StudioError) -> TurnUpdate {
        let message = err.user_message();
        if err.is_terminal() {
            self.finish_turn(TurnPhase::Errored, Some(message))
        } else {
            warn!("Skipped frame: {}", err);
            self.report_error(message.clone());
            TurnUpdate::FrameError(message)
        }
    }

    fn update_assistant<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ChatMessage),
    {
        let Some(turn) = self.active.as_ref() else {
            return;
        };
        if let Some(message) = self.conversation.get_mut(&turn.assistant_id) {
            f(message);
        }
    }

    /// Artifact transitions also refresh derived urls and progress.
    fn update_artifacts<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ChatMessage),
    {
        let Some(turn) = self.active.as_ref() else {
            return;
        };
        let Some(message) = self.conversation.get_mut(&turn.assistant_id) else {
            return;
        };

        f(message);
        message.refresh_media_urls();

        let progress = message.artifact_progress();
        self.generation
            .update(&turn.session_id, |state| state.set_progress(progress));
    }
}
