//! Prompt playground: a mocked image-generation session with a
//! deduplicated history of recent previews.

pub mod catalog;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod history;
pub mod picker;
pub mod playground;
pub mod render;
pub mod session;
pub mod vibe;

pub use catalog::{catalog, Sample};
pub use config::PlaygroundCfg;
pub use engine::{MockEngine, PreviewEngine};
pub use error::PlaygroundError;
pub use events::PlaygroundEvent;
pub use history::{visible_history, HISTORY_LIMIT};
pub use picker::SamplePicker;
pub use playground::Playground;
pub use session::{Session, SessionSnapshot};
pub use vibe::Vibe;
