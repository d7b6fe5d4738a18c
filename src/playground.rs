use std::sync::Arc;

use chrono::Utc;
use futures_util::{Stream, StreamExt};
use tokio::sync::{broadcast, Mutex};
use tokio_stream::wrappers::BroadcastStream;
use tracing::Instrument;
use uuid::Uuid;

use crate::catalog::Sample;
use crate::clipboard::Clipboard;
use crate::config::PlaygroundCfg;
use crate::engine::{MockEngine, PreviewEngine};
use crate::error::PlaygroundError;
use crate::events::PlaygroundEvent;
use crate::session::{Session, SessionSnapshot};
use crate::vibe::Vibe;

/// Shared handle to one playground session. Clones point at the same session.
#[derive(Clone)]
pub struct Playground {
    session_id: String,
    state: Arc<Mutex<Session>>,
    engine: Arc<dyn PreviewEngine>,
    clipboard: Arc<dyn Clipboard>,
    events_tx: broadcast::Sender<PlaygroundEvent>,
}

impl Playground {
    pub fn new(
        session: Session,
        engine: Arc<dyn PreviewEngine>,
        clipboard: Arc<dyn Clipboard>,
        event_buffer: usize,
    ) -> Self {
        let (events_tx, _rx) = broadcast::channel(event_buffer.max(1));
        Self {
            session_id: format!("session-{}", Uuid::new_v4()),
            state: Arc::new(Mutex::new(session)),
            engine,
            clipboard,
            events_tx,
        }
    }

    /// Session and mock engine as described by `cfg`.
    pub fn from_cfg(cfg: &PlaygroundCfg, clipboard: Arc<dyn Clipboard>) -> Self {
        let session = Session::new(cfg.default_prompt.clone(), cfg.default_vibe, cfg.history_limit);
        let engine = Arc::new(MockEngine::with_seed(cfg.delay(), cfg.seed));
        Self::new(session, engine, clipboard, cfg.event_buffer)
    }

    pub fn session_id(&self) -> &str { &self.session_id }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaygroundEvent> {
        self.events_tx.subscribe()
    }

    /// Events for this session. Lagged receivers silently skip what they missed.
    pub fn events(&self) -> impl Stream<Item = PlaygroundEvent> + Send + 'static {
        BroadcastStream::new(self.events_tx.subscribe()).filter_map(|msg| async move { msg.ok() })
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.snapshot(&self.session_id)
    }

    pub async fn set_prompt(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.lock().await.set_prompt(text.clone());
        tracing::debug!(session = %self.session_id, len = text.len(), "prompt edited");
        self.emit(PlaygroundEvent::PromptEdited { session_id: self.session_id.clone(), prompt: text });
    }

    pub async fn select_vibe(&self, vibe: Vibe) {
        self.state.lock().await.select_vibe(vibe);
        tracing::debug!(session = %self.session_id, %vibe, "vibe selected");
        self.emit(PlaygroundEvent::VibeSelected { session_id: self.session_id.clone(), vibe });
    }

    /// Validates the current prompt, then runs the engine to completion.
    ///
    /// The generation runs on its own task: dropping the returned future does
    /// not stop it, and the session still receives the result.
    pub async fn submit(&self) -> Result<Sample, PlaygroundError> {
        let (begun, status) = {
            let mut st = self.state.lock().await;
            let begun = st.begin_submit();
            (begun, st.status_message().map(str::to_string))
        };
        let prompt = match begun {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(session = %self.session_id, error = %e, "submission rejected");
                if matches!(e, PlaygroundError::EmptyPrompt) {
                    self.emit_status(status);
                }
                return Err(e);
            }
        };

        tracing::info!(session = %self.session_id, engine = self.engine.name(), "generating preview");
        self.emit(PlaygroundEvent::GenerationStarted { session_id: self.session_id.clone(), prompt: prompt.clone() });
        self.emit_status(status);

        let this = self.clone();
        let span = tracing::info_span!("generation", session = %self.session_id);
        let task = tokio::spawn(
            async move {
                let sample = this.engine.generate(&prompt).await;
                let status = {
                    let mut st = this.state.lock().await;
                    st.complete_submit(sample.clone());
                    st.status_message().map(str::to_string)
                };
                tracing::info!(id = sample.id, "preview ready");
                this.emit(PlaygroundEvent::GenerationFinished {
                    session_id: this.session_id.clone(),
                    sample: sample.clone(),
                    finished_at: Utc::now(),
                });
                this.emit(PlaygroundEvent::ActiveChanged { session_id: this.session_id.clone(), id: sample.id });
                this.emit_status(status);
                sample
            }
            .instrument(span),
        );

        match task.await {
            Ok(sample) => Ok(sample),
            Err(e) => {
                tracing::error!(session = %self.session_id, error = %e, "generation task lost");
                self.state.lock().await.abort_submit();
                Err(PlaygroundError::Generation(e))
            }
        }
    }

    /// `index` is a position in the visible history.
    pub async fn select_history(&self, index: usize) -> Result<Sample, PlaygroundError> {
        let picked = self.state.lock().await.select_history(index)?.clone();
        tracing::debug!(session = %self.session_id, id = picked.id, "history entry selected");
        self.emit(PlaygroundEvent::ActiveChanged { session_id: self.session_id.clone(), id: picked.id });
        Ok(picked)
    }

    /// Copies the current prompt. A clipboard failure leaves the session as it was.
    pub async fn copy_prompt(&self) -> Result<(), PlaygroundError> {
        let text = self.state.lock().await.prompt_text().to_string();
        if let Err(e) = self.clipboard.write_text(&text) {
            tracing::warn!(session = %self.session_id, error = %e, "clipboard write failed");
            return Err(PlaygroundError::Clipboard(e));
        }
        let status = {
            let mut st = self.state.lock().await;
            st.mark_copied();
            st.status_message().map(str::to_string)
        };
        self.emit_status(status);
        Ok(())
    }

    fn emit_status(&self, message: Option<String>) {
        if let Some(message) = message {
            self.emit(PlaygroundEvent::Status { session_id: self.session_id.clone(), message });
        }
    }

    fn emit(&self, evt: PlaygroundEvent) {
        // No subscribers is fine.
        let _ = self.events_tx.send(evt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::engine::DEFAULT_DELAY;
    use crate::picker::ScriptedPicker;
    use crate::session::{MSG_COPIED, MSG_MOCKED, MSG_NEEDS_DETAIL};

    fn playground(script: Vec<usize>) -> (Playground, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::default());
        let engine = Arc::new(MockEngine::new(DEFAULT_DELAY, Arc::new(ScriptedPicker::new(script))));
        (Playground::new(Session::default(), engine, clipboard.clone(), 16), clipboard)
    }

    #[tokio::test(start_paused = true)]
    async fn submit_emits_events_in_order() {
        let (pg, _) = playground(vec![1]);
        let mut rx = pg.subscribe();
        pg.set_prompt("red bicycle").await;
        let sample = pg.submit().await.unwrap();
        assert_eq!(sample.id, 2);

        let mut kinds = Vec::new();
        while let Ok(evt) = rx.try_recv() {
            kinds.push(serde_json::to_value(&evt).unwrap()["type"].as_str().unwrap().to_string());
        }
        assert_eq!(
            kinds,
            vec!["prompt_edited", "generation_started", "status", "generation_finished", "active_changed", "status"]
        );
        let snap = pg.snapshot().await;
        assert_eq!(snap.status.as_deref(), Some(MSG_MOCKED));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_prompt_emits_only_status() {
        let (pg, _) = playground(vec![0]);
        pg.set_prompt("   ").await;
        let mut rx = pg.subscribe();
        assert!(matches!(pg.submit().await, Err(PlaygroundError::EmptyPrompt)));
        match rx.try_recv().unwrap() {
            PlaygroundEvent::Status { message, .. } => assert_eq!(message, MSG_NEEDS_DETAIL),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn copy_writes_prompt_and_sets_status() {
        let (pg, clipboard) = playground(vec![0]);
        pg.set_prompt("copy me").await;
        pg.copy_prompt().await.unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("copy me"));
        assert_eq!(pg.snapshot().await.status.as_deref(), Some(MSG_COPIED));
    }

    struct BrokenClipboard;
    impl Clipboard for BrokenClipboard {
        fn write_text(&self, _text: &str) -> anyhow::Result<()> {
            anyhow::bail!("no clipboard available")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn copy_failure_leaves_state_alone() {
        let engine = Arc::new(MockEngine::default());
        let pg = Playground::new(Session::default(), engine, Arc::new(BrokenClipboard), 4);
        let before = pg.snapshot().await;
        assert!(matches!(pg.copy_prompt().await, Err(PlaygroundError::Clipboard(_))));
        assert_eq!(pg.snapshot().await, before);
    }

    #[tokio::test(start_paused = true)]
    async fn events_stream_yields_session_events() {
        let (pg, _) = playground(vec![0]);
        let stream = pg.events();
        tokio::pin!(stream);
        pg.select_vibe(Vibe::Surreal).await;
        let evt = stream.next().await.unwrap();
        assert_eq!(evt, PlaygroundEvent::VibeSelected { session_id: pg.session_id().to_string(), vibe: Vibe::Surreal });
    }

    #[tokio::test(start_paused = true)]
    async fn reselecting_vibe_emits_each_time() {
        let (pg, _) = playground(vec![0]);
        let mut rx = pg.subscribe();
        pg.select_vibe(Vibe::Surreal).await;
        pg.select_vibe(Vibe::Surreal).await;

        assert_eq!(pg.snapshot().await.vibe, Vibe::Surreal);
        for _ in 0..2 {
            match rx.try_recv().unwrap() {
                PlaygroundEvent::VibeSelected { vibe, .. } => assert_eq!(vibe, Vibe::Surreal),
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert!(rx.try_recv().is_err());
    }

    struct PanickingEngine;

    #[async_trait::async_trait]
    impl PreviewEngine for PanickingEngine {
        async fn generate(&self, _prompt: &str) -> Sample {
            panic!("engine blew up")
        }

        fn name(&self) -> &'static str { "panicking" }
    }

    #[tokio::test(start_paused = true)]
    async fn lost_generation_clears_pending() {
        let pg = Playground::new(Session::default(), Arc::new(PanickingEngine), Arc::new(MemoryClipboard::default()), 4);
        assert!(matches!(pg.submit().await, Err(PlaygroundError::Generation(_))));

        let snap = pg.snapshot().await;
        assert!(!snap.is_pending);
        assert_eq!(snap.recent_count, 1);
        assert!(!matches!(pg.submit().await, Err(PlaygroundError::AlreadyPending)));
    }
}
