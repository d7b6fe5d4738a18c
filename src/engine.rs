use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::catalog::{catalog, Sample};
use crate::picker::{SamplePicker, SeededPicker, UniformPicker};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1100);

/// Turns a submitted prompt into a preview. Infallible: the only way a
/// submission fails is validation, which happens before this is reached.
#[async_trait]
pub trait PreviewEngine: Send + Sync {
    async fn generate(&self, prompt: &str) -> Sample;
    fn name(&self) -> &'static str;
}

/// Waits a fixed delay, then hands back a catalog sample carrying the prompt.
/// The prompt text never influences which sample is chosen.
pub struct MockEngine {
    delay: Duration,
    picker: Arc<dyn SamplePicker>,
}

impl MockEngine {
    pub fn new(delay: Duration, picker: Arc<dyn SamplePicker>) -> Self {
        Self { delay, picker }
    }

    /// Uniform picks, seeded when `seed` is given.
    pub fn with_seed(delay: Duration, seed: Option<u64>) -> Self {
        let picker: Arc<dyn SamplePicker> = match seed {
            Some(seed) => Arc::new(SeededPicker::new(seed)),
            None => Arc::new(UniformPicker),
        };
        Self::new(delay, picker)
    }
}

impl Default for MockEngine {
    fn default() -> Self { Self::with_seed(DEFAULT_DELAY, None) }
}

#[async_trait]
impl PreviewEngine for MockEngine {
    fn name(&self) -> &'static str { "mock" }

    async fn generate(&self, prompt: &str) -> Sample {
        tokio::time::sleep(self.delay).await;

        let entries = catalog();
        let idx = self.picker.pick(entries.len()).min(entries.len() - 1);
        let chosen = &entries[idx];
        tracing::debug!(picker = self.picker.name(), id = chosen.id, "picked catalog sample");

        chosen.to_sample().with_prompt(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::ScriptedPicker;

    #[tokio::test(start_paused = true)]
    async fn returns_scripted_sample_with_prompt() {
        let engine = MockEngine::new(DEFAULT_DELAY, Arc::new(ScriptedPicker::new([2])));
        let started = tokio::time::Instant::now();
        let sample = engine.generate(" red bicycle ").await;

        assert_eq!(sample.id, 3);
        assert_eq!(sample.prompt, " red bicycle ");
        assert_eq!(sample.image_url, catalog()[2].image_url);
        assert!(started.elapsed() >= DEFAULT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_does_not_steer_choice() {
        let a = MockEngine::with_seed(Duration::ZERO, Some(7));
        let b = MockEngine::with_seed(Duration::ZERO, Some(7));
        for prompt in ["cat", "a very different prompt", ""] {
            assert_eq!(a.generate(prompt).await.id, b.generate("fixed").await.id);
        }
    }
}
