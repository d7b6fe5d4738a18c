use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_PROMPT;
use crate::engine::DEFAULT_DELAY;
use crate::history::HISTORY_LIMIT;
use crate::vibe::Vibe;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundCfg {
    pub delay_ms: u64,
    pub history_limit: usize,
    /// Seeds the sample picker; unseeded picks come from the thread RNG.
    pub seed: Option<u64>,
    pub default_prompt: String,
    pub default_vibe: Vibe,
    pub event_buffer: usize,
}

impl Default for PlaygroundCfg {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY.as_millis() as u64,
            history_limit: HISTORY_LIMIT,
            seed: None,
            default_prompt: DEFAULT_PROMPT.to_string(),
            default_vibe: Vibe::default(),
            event_buffer: 64,
        }
    }
}

impl PlaygroundCfg {
    pub async fn load(path: &Path) -> Result<Self> {
        let txt = tokio::fs::read_to_string(path)
            .await
            .context(format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&txt)
    }

    pub fn from_yaml(txt: &str) -> Result<Self> {
        let mut cfg: Self = serde_yaml::from_str(txt).context("Failed to parse config YAML")?;
        cfg.validate();
        Ok(cfg)
    }

    /// Keeps `history_limit` within `1..=HISTORY_LIMIT` so the active result always shows.
    pub fn validate(&mut self) {
        let clamped = self.history_limit.clamp(1, HISTORY_LIMIT);
        if clamped != self.history_limit {
            tracing::warn!(requested = self.history_limit, using = clamped, "history_limit out of range");
            self.history_limit = clamped;
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// `PLAYGROUND_*` overrides; values that don't parse or are out of range are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("PLAYGROUND_DELAY_MS").and_then(|v| v.parse().ok()) { self.delay_ms = v; }
        if let Some(v) = lookup("PLAYGROUND_SEED").and_then(|v| v.parse().ok()) { self.seed = Some(v); }
        if let Some(v) = lookup("PLAYGROUND_HISTORY_LIMIT").and_then(|v| v.parse().ok())
            .filter(|v| (1..=HISTORY_LIMIT).contains(v))
        {
            self.history_limit = v;
        }
        if let Some(v) = lookup("PLAYGROUND_VIBE").and_then(|v| v.parse().ok()) { self.default_vibe = v; }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
