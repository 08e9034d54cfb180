//! Line-based rendering of turn updates.
//!
//! ```text
//!   … Thinking...
//! Here is your fox
//!   ◌ a1 image processing
//!   ✓ a1 image completed http://img.url
//!   ✓ done
//! ```

use std::collections::HashMap;
use std::io::{self, Write};

use crate::models::{ArtifactStatus, ChatMessage};
use crate::orchestrator::{TurnPhase, TurnUpdate};

/// Writes updates of one turn, printing only what changed.
#[derive(Debug, Default)]
pub struct TurnPrinter {
    /// Assistant content already written
    printed: String,
    /// Last printed status per artifact id
    artifacts: HashMap<String, ArtifactStatus>,
}

impl TurnPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `update`, reading the current state of `assistant`.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        update: &TurnUpdate,
        assistant: Option<&ChatMessage>,
    ) -> io::Result<()> {
        match update {
            TurnUpdate::Thought(desc) => writeln!(out, "  … {}", desc)?,
            TurnUpdate::Content(text) => self.write_content(out, text)?,
            TurnUpdate::Artifacts => {
                if let Some(assistant) = assistant {
                    self.write_artifacts(out, assistant)?;
                }
            }
            TurnUpdate::FrameError(message) => writeln!(out, "  ! {}", message)?,
            TurnUpdate::Ignored(_) => {}
            TurnUpdate::Finished(phase) => {
                if !self.printed.is_empty() && !self.printed.ends_with('\n') {
                    writeln!(out)?;
                }
                match phase {
                    TurnPhase::Completed => writeln!(out, "  ✓ done")?,
                    TurnPhase::Cancelled => writeln!(out, "  ✗ cancelled")?,
                    TurnPhase::Errored => writeln!(out, "  ✗ failed")?,
                    _ => {}
                }
            }
        }
        out.flush()
    }

    /// Content events carry the full text; print only the new suffix when
    /// the text grew, otherwise start over on a fresh line.
    fn write_content<W: Write>(&mut self, out: &mut W, text: &str) -> io::Result<()> {
        if let Some(suffix) = text.strip_prefix(self.printed.as_str()) {
            write!(out, "{}", suffix)?;
        } else {
            if !self.printed.is_empty() {
                writeln!(out)?;
            }
            write!(out, "{}", text)?;
        }
        self.printed = text.to_string();
        Ok(())
    }

    fn write_artifacts<W: Write>(&mut self, out: &mut W, assistant: &ChatMessage) -> io::Result<()> {
        for artifact in &assistant.artifacts {
            if self.artifacts.get(&artifact.id) == Some(&artifact.status) {
                continue;
            }
            self.artifacts.insert(artifact.id.clone(), artifact.status);

            let icon = match artifact.status {
                ArtifactStatus::Completed => "✓",
                ArtifactStatus::Failed => "✗",
                _ => "◌",
            };
            write!(out, "  {} {} {} {:?}", icon, artifact.id, artifact.kind, artifact.status)?;
            if let Some(url) = artifact.completed_url() {
                write!(out, " {}", url)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
