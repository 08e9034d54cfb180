use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::artifact::{Artifact, MediaKind};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Lifecycle of a message
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Assistant placeholder still receiving events
    #[default]
    Pending,
    Complete,
    Error,
}

/// A single entry in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    pub status: MessageStatus,
    /// Latest "thinking" status text; cleared when the turn ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    /// First completed image artifact's URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// First completed video artifact's URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl ChatMessage {
    /// A finished user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            model_used: None,
            status: MessageStatus::Complete,
            thought: None,
            artifacts: Vec::new(),
            image_url: None,
            video_url: None,
        }
    }

    /// An empty assistant placeholder waiting for stream events.
    pub fn assistant_placeholder(model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: String::new(),
            timestamp: Utc::now(),
            model_used: Some(model.into()),
            status: MessageStatus::Pending,
            thought: None,
            artifacts: Vec::new(),
            image_url: None,
            video_url: None,
        }
    }

    pub fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    pub fn artifact_mut(&mut self, id: &str) -> Option<&mut Artifact> {
        self.artifacts.iter_mut().find(|a| a.id == id)
    }

    /// Insert a new artifact or merge into the existing one with the same id.
    ///
    /// An existing artifact keeps its status when the incoming one would
    /// move it backwards.
    pub fn upsert_artifact(&mut self, artifact: Artifact) {
        match self.artifact_mut(&artifact.id) {
            Some(existing) => {
                existing.kind = artifact.kind;
                existing.apply_status(artifact.status, artifact.url);
            }
            None => self.artifacts.push(artifact),
        }
    }

    /// Recompute `image_url` / `video_url` from the artifact list.
    pub fn refresh_media_urls(&mut self) {
        self.image_url = self.first_completed_url(MediaKind::Image);
        self.video_url = self.first_completed_url(MediaKind::Video);
    }

    fn first_completed_url(&self, kind: MediaKind) -> Option<String> {
        self.artifacts
            .iter()
            .filter(|a| a.media_kind() == kind)
            .find_map(|a| a.completed_url())
            .map(str::to_string)
    }

    /// Percentage of artifacts in a terminal status, 0 when there are none.
    pub fn artifact_progress(&self) -> u8 {
        if self.artifacts.is_empty() {
            return 0;
        }
        let done = self
            .artifacts
            .iter()
            .filter(|a| a.status.is_terminal())
            .count();
        ((done * 100) / self.artifacts.len()) as u8
    }
}
