use serde::{Deserialize, Serialize};

/// How the backend should run the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Backend plans and produces artifacts on its own
    #[default]
    Managed,
    /// Plain conversational reply
    Chat,
}

impl std::str::FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "managed" => Ok(GenerationMode::Managed),
            "chat" => Ok(GenerationMode::Chat),
            other => Err(format!("unknown generation mode: {}", other)),
        }
    }
}

/// Body of the streaming generation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamRequest {
    pub session_id: String,
    pub content: String,
    pub model: String,
    pub mode: GenerationMode,
}

impl StreamRequest {
    pub fn new(
        session_id: impl Into<String>,
        content: impl Into<String>,
        model: impl Into<String>,
        mode: GenerationMode,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            content: content.into(),
            model: model.into(),
            mode,
        }
    }
}
