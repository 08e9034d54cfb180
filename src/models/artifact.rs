use serde::{Deserialize, Serialize};

/// Production state of a generated artifact.
///
/// Ordered `Pending < Processing < {Completed, Failed}`. Once an artifact
/// reaches a terminal state it never moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ArtifactStatus {
    /// Whether this status is final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ArtifactStatus::Completed | ArtifactStatus::Failed)
    }

    fn rank(&self) -> u8 {
        match self {
            ArtifactStatus::Pending => 0,
            ArtifactStatus::Processing => 1,
            ArtifactStatus::Completed | ArtifactStatus::Failed => 2,
        }
    }

    /// Whether moving from `self` to `next` keeps the status monotonic.
    pub fn can_advance_to(&self, next: ArtifactStatus) -> bool {
        next.rank() >= self.rank()
    }
}

/// Media classification of an artifact's free-form `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Classify a wire type such as `"image"`, `"image/png"` or `"video_mp4"`.
    pub fn from_type(kind: &str) -> Self {
        let kind = kind.trim().to_ascii_lowercase();
        if kind.starts_with("image") {
            MediaKind::Image
        } else if kind.starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }
}

/// A generated media object attached to an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ArtifactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Artifact {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, status: ArtifactStatus) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            status,
            url: None,
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_type(&self.kind)
    }

    /// Apply a status update from the server.
    ///
    /// Returns `false` and leaves the artifact untouched when the update
    /// would move a terminal artifact back to a non-terminal state.
    /// A `None` url keeps the current one.
    pub fn apply_status(&mut self, status: ArtifactStatus, url: Option<String>) -> bool {
        if !self.status.can_advance_to(status) {
            return false;
        }
        self.status = status;
        if url.is_some() {
            self.url = url;
        }
        true
    }

    /// Force a non-terminal artifact to `Failed`. Returns whether it changed.
    pub fn fail_if_unfinished(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = ArtifactStatus::Failed;
        true
    }

    /// URL of a finished artifact, if it has one.
    pub fn completed_url(&self) -> Option<&str> {
        match self.status {
            ArtifactStatus::Completed => self.url.as_deref(),
            _ => None,
        }
    }
}
