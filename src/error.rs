use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// The only user-facing validation failure: nothing but whitespace was submitted.
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("a preview is already being generated")]
    AlreadyPending,
    #[error("no history entry at position {0}")]
    NoSuchEntry(usize),
    #[error("unknown vibe: {0}")]
    UnknownVibe(String),
    #[error("clipboard write failed: {0}")]
    Clipboard(#[source] anyhow::Error),
    #[error("generation task was lost: {0}")]
    Generation(#[from] tokio::task::JoinError),
}
