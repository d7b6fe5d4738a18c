use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Sample;
use crate::vibe::Vibe;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaygroundEvent {
    PromptEdited { session_id: String, prompt: String },
    VibeSelected { session_id: String, vibe: Vibe },
    Status { session_id: String, message: String },
    GenerationStarted { session_id: String, prompt: String },
    GenerationFinished { session_id: String, sample: Sample, finished_at: DateTime<Utc> },
    ActiveChanged { session_id: String, id: u32 },
}

impl PlaygroundEvent {
    pub fn session_id(&self) -> &str {
        match self {
            PlaygroundEvent::PromptEdited { session_id, .. }
            | PlaygroundEvent::VibeSelected { session_id, .. }
            | PlaygroundEvent::Status { session_id, .. }
            | PlaygroundEvent::GenerationStarted { session_id, .. }
            | PlaygroundEvent::GenerationFinished { session_id, .. }
            | PlaygroundEvent::ActiveChanged { session_id, .. } => session_id,
        }
    }
}
