use super::client::NarrationClient;
use super::sink::AudioSink;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

/// Bound on how long a preload may sit without the sink signalling "can play
/// through" before the session fails with `LoadTimeout`.
pub const DEFAULT_PRELOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal failure kinds for one playback session. None is retried
/// automatically; the user retries by starting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackErrorKind {
    /// The sink never signalled "can play through" within the bound
    LoadTimeout,
    /// The sink reported a loading failure
    LoadError,
    /// The play call itself was rejected
    PlaybackError,
    /// Server: recipe does not exist
    NotFound,
    /// Server: recipe content cannot be narrated
    InvalidRecipe,
    /// Server: a narration provider failed
    GenerationFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Preloading,
    Ready,
    Playing,
    Ended,
    Error(PlaybackErrorKind),
}

/// Snapshot of the current playback session
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub status: PlaybackStatus,
    pub source_url: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

/// Single-fire completion callback, invoked on the Playing -> Ended
/// transition of the session that registered it.
pub type OnEnded = Box<dyn FnOnce() + Send>;

struct SessionState {
    /// Bumped on every teardown; in-flight work from an older epoch discards
    /// its result instead of applying it to a torn-down session.
    epoch: u64,
    status: PlaybackStatus,
    source_url: Option<String>,
    started_at: Option<DateTime<Utc>>,
}

/// Client-side audio lifecycle state machine.
///
/// Owns the sink exclusively and keeps at most one live session: starting a
/// new session always tears down the previous one first. `stop` is
/// synchronous, idempotent, and cancels in-flight generation or preload by
/// invalidating the session epoch.
pub struct PlaybackController<S: AudioSink> {
    sink: Arc<S>,
    narration_client: Arc<dyn NarrationClient>,
    state: Mutex<SessionState>,
    preload_timeout: Duration,
}

impl<S: AudioSink> PlaybackController<S> {
    pub fn new(sink: Arc<S>, narration_client: Arc<dyn NarrationClient>) -> Self {
        Self {
            sink,
            narration_client,
            state: Mutex::new(SessionState {
                epoch: 0,
                status: PlaybackStatus::Idle,
                source_url: None,
                started_at: None,
            }),
            preload_timeout: DEFAULT_PRELOAD_TIMEOUT,
        }
    }

    pub fn with_preload_timeout(mut self, preload_timeout: Duration) -> Self {
        self.preload_timeout = preload_timeout;
        self
    }

    pub fn status(&self) -> PlaybackStatus {
        self.lock().status
    }

    pub fn session(&self) -> PlaybackSession {
        let state = self.lock();
        PlaybackSession {
            status: state.status,
            source_url: state.source_url.clone(),
            started_at: state.started_at,
        }
    }

    pub fn error_kind(&self) -> Option<PlaybackErrorKind> {
        match self.status() {
            PlaybackStatus::Error(kind) => Some(kind),
            _ => None,
        }
    }

    /// Load and play one audio source, driving the session to `Ended` or a
    /// terminal `Error`. Returns the session's final observed status.
    ///
    /// With `cached_url: None` the narration endpoint is called first; its
    /// failure kinds surface directly as the session error. `on_ended` fires
    /// exactly once, on natural completion only.
    pub async fn start(
        &self,
        recipe_id: Uuid,
        cached_url: Option<String>,
        script_override: Option<String>,
        on_ended: Option<OnEnded>,
    ) -> PlaybackStatus {
        // Teardown-before-start: at most one session may be live
        let epoch = {
            let mut state = self.lock();
            if state.status != PlaybackStatus::Idle {
                self.sink.stop();
            }
            state.epoch += 1;
            state.status = PlaybackStatus::Idle;
            state.source_url = None;
            state.started_at = None;
            state.epoch
        };

        let source_url = match cached_url {
            Some(url) => url,
            None => {
                match self
                    .narration_client
                    .generate(recipe_id, script_override)
                    .await
                {
                    Ok(url) => url,
                    Err(kind) => return self.fail(epoch, kind),
                }
            }
        };

        if !self.enter_preloading(epoch, &source_url) {
            return self.status();
        }

        match tokio::time::timeout(self.preload_timeout, self.sink.preload(&source_url)).await {
            Err(_elapsed) => {
                tracing::warn!(url = %source_url, "Audio preload timed out");
                return self.fail(epoch, PlaybackErrorKind::LoadTimeout);
            }
            Ok(Err(error)) => {
                tracing::warn!(url = %source_url, error = %error, "Audio preload failed");
                return self.fail(epoch, PlaybackErrorKind::LoadError);
            }
            Ok(Ok(())) => {}
        }

        if !self.transition(epoch, PlaybackStatus::Ready) {
            return self.status();
        }

        if let Err(error) = self.sink.play().await {
            tracing::warn!(url = %source_url, error = %error, "Audio play was rejected");
            return self.fail(epoch, PlaybackErrorKind::PlaybackError);
        }

        {
            let mut state = self.lock();
            if state.epoch != epoch {
                return state.status;
            }
            state.status = PlaybackStatus::Playing;
            state.started_at = Some(Utc::now());
        }

        self.sink.ended().await;

        if !self.transition(epoch, PlaybackStatus::Ended) {
            return self.status();
        }

        if let Some(on_ended) = on_ended {
            on_ended();
        }

        let mut state = self.lock();
        if state.epoch == epoch {
            self.sink.stop();
            state.status = PlaybackStatus::Idle;
            state.source_url = None;
            state.started_at = None;
        }
        state.status
    }

    /// Stop playback and return to `Idle`. Synchronous, valid from any
    /// state, and a no-op when already idle. The owning UI context calls
    /// this on navigation and unmount; `Drop` covers the rest.
    pub fn stop(&self) {
        let mut state = self.lock();
        // Invalidate in-flight generation/preload regardless of status
        state.epoch += 1;
        if state.status == PlaybackStatus::Idle {
            return;
        }
        self.sink.stop();
        state.status = PlaybackStatus::Idle;
        state.source_url = None;
        state.started_at = None;
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enter_preloading(&self, epoch: u64, source_url: &str) -> bool {
        let mut state = self.lock();
        if state.epoch != epoch {
            return false;
        }
        state.status = PlaybackStatus::Preloading;
        state.source_url = Some(source_url.to_string());
        true
    }

    fn transition(&self, epoch: u64, status: PlaybackStatus) -> bool {
        let mut state = self.lock();
        if state.epoch != epoch {
            return false;
        }
        state.status = status;
        true
    }

    fn fail(&self, epoch: u64, kind: PlaybackErrorKind) -> PlaybackStatus {
        let mut state = self.lock();
        if state.epoch != epoch {
            // The session was torn down while this work was in flight
            return state.status;
        }
        self.sink.stop();
        state.status = PlaybackStatus::Error(kind);
        state.started_at = None;
        state.status
    }
}

impl<S: AudioSink> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
