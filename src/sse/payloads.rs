//! Wire payload structs for the `data:` field of each event type.

use serde::{Deserialize, Serialize};

use crate::models::{Artifact, ArtifactStatus};

#[derive(Debug, Deserialize)]
pub(crate) struct ThoughtPayload {
    pub desc: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagePayload {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub message: String,
}

/// `artifact` event: a new artifact was announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: ArtifactStatus,
}

impl ArtifactPayload {
    pub fn into_artifact(self) -> Artifact {
        Artifact::new(self.id, self.kind, self.status)
    }
}

/// One entry of an `artifact_status` batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStatusEntry {
    pub id: String,
    pub status: ArtifactStatus,
    #[serde(default)]
    pub url: Option<String>,
}

/// `artifact_status` event: batch of status updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStatusPayload {
    pub artifacts: Vec<ArtifactStatusEntry>,
    /// Informational; the turn still ends on `done`.
    #[serde(default)]
    pub all_done: bool,
}
