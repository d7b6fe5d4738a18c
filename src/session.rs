use serde::Serialize;

use crate::catalog::{initial_sample, Sample, DEFAULT_PROMPT};
use crate::error::PlaygroundError;
use crate::history::{visible_history_with_limit, HISTORY_LIMIT};
use crate::vibe::Vibe;

pub const MSG_NEEDS_DETAIL: &str = "Add a bit more detail to your prompt to get the best results.";
pub const MSG_GENERATING: &str = "Generating preview...";
pub const MSG_MOCKED: &str = "This is a mocked preview. Connect the API to see real results.";
pub const MSG_COPIED: &str = "Prompt copied to clipboard!";

/// Everything the preview UI renders from. Mutated only through the methods
/// below; `visible` is a cache of the history view, refreshed whenever
/// `active` or `recent` change.
#[derive(Debug, Clone)]
pub struct Session {
    prompt_text: String,
    selected_vibe: Vibe,
    is_pending: bool,
    active: Sample,
    status: Option<String>,
    recent: Vec<Sample>,
    history_limit: usize,
    visible: Vec<Sample>,
}

/// Serializable view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub prompt: String,
    pub vibe: Vibe,
    pub is_pending: bool,
    pub active: Sample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub visible_history: Vec<Sample>,
    pub recent_count: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT, Vibe::default(), HISTORY_LIMIT)
    }
}

impl Session {
    /// `history_limit` is clamped to `1..=HISTORY_LIMIT`.
    pub fn new(prompt: impl Into<String>, vibe: Vibe, history_limit: usize) -> Self {
        let active = initial_sample();
        let recent = vec![active.clone()];
        let mut session = Self {
            prompt_text: prompt.into(),
            selected_vibe: vibe,
            is_pending: false,
            active,
            status: None,
            recent,
            history_limit: history_limit.clamp(1, HISTORY_LIMIT),
            visible: Vec::new(),
        };
        session.refresh_visible();
        session
    }

    pub fn prompt_text(&self) -> &str { &self.prompt_text }
    pub fn selected_vibe(&self) -> Vibe { self.selected_vibe }
    pub fn is_pending(&self) -> bool { self.is_pending }
    pub fn active_result(&self) -> &Sample { &self.active }
    pub fn status_message(&self) -> Option<&str> { self.status.as_deref() }
    pub fn recent_results(&self) -> &[Sample] { &self.recent }
    pub fn visible_history(&self) -> &[Sample] { &self.visible }

    /// Any text is accepted, including empty.
    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt_text = text.into();
    }

    pub fn select_vibe(&mut self, vibe: Vibe) {
        self.selected_vibe = vibe;
    }

    /// Validates the current prompt and enters the pending state.
    /// Returns the exact text to generate from.
    pub fn begin_submit(&mut self) -> Result<String, PlaygroundError> {
        if self.is_pending {
            return Err(PlaygroundError::AlreadyPending);
        }
        if self.prompt_text.trim().is_empty() {
            self.status = Some(MSG_NEEDS_DETAIL.to_string());
            return Err(PlaygroundError::EmptyPrompt);
        }
        self.is_pending = true;
        self.status = Some(MSG_GENERATING.to_string());
        Ok(self.prompt_text.clone())
    }

    /// Applies a finished generation in one step.
    pub fn complete_submit(&mut self, result: Sample) {
        self.recent.insert(0, result.clone());
        self.active = result;
        self.is_pending = false;
        self.status = Some(MSG_MOCKED.to_string());
        self.refresh_visible();
    }

    /// Leaves the pending state without a result.
    pub fn abort_submit(&mut self) {
        self.is_pending = false;
        self.status = None;
    }

    /// Makes the visible-history entry at `index` the active result.
    pub fn select_history(&mut self, index: usize) -> Result<&Sample, PlaygroundError> {
        let picked = self.visible.get(index).cloned().ok_or(PlaygroundError::NoSuchEntry(index))?;
        self.active = picked;
        self.refresh_visible();
        Ok(&self.active)
    }

    pub fn mark_copied(&mut self) {
        self.status = Some(MSG_COPIED.to_string());
    }

    pub fn snapshot(&self, session_id: &str) -> SessionSnapshot {
        SessionSnapshot {
            session_id: session_id.to_string(),
            prompt: self.prompt_text.clone(),
            vibe: self.selected_vibe,
            is_pending: self.is_pending,
            active: self.active.clone(),
            status: self.status.clone(),
            visible_history: self.visible.clone(),
            recent_count: self.recent.len(),
        }
    }

    fn refresh_visible(&mut self) {
        self.visible = visible_history_with_limit(&self.active, &self.recent, self.history_limit);
    }
}
