//! # Playback Session Controller
//!
//! Owns one player screen's session against an injected [`PlaybackEngine`].
//!
//! The controller registers an engine listener and stops the engine as soon
//! as it is created, then [`load`](PlaybackSessionController::load) resolves
//! the video id against the cache and binds the media. [`release`] stops the
//! engine and detaches the listener exactly once; dropping the controller
//! releases it too.
//!
//! Engine notifications only touch state while it is `Loaded` and the session
//! has not been released.
//!
//! [`release`]: PlaybackSessionController::release

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bridge_traits::playback::{
    EngineListener, EngineState, ListenerId, MediaSource, PlaybackEngine,
};
use core_library::VideoRepository;
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
use core_runtime::observable::{StateCell, StateReceiver};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::{PlaybackError, Result};
use crate::state::{LoadedSession, PlaybackUiState};

/// State shared between the controller and its engine listener.
struct SessionShared {
    video_id: String,
    state: StateCell<PlaybackUiState>,
    released: AtomicBool,
    event_bus: EventBus,
}

impl SessionShared {
    fn emit(&self, event: PlaybackEvent) {
        self.event_bus.emit(CoreEvent::Playback(event)).ok();
    }

    fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

/// Engine listener registered for the lifetime of a session.
struct SessionListener {
    shared: Arc<SessionShared>,
}

impl EngineListener for SessionListener {
    fn on_state_changed(&self, engine_state: EngineState) {
        if self.shared.is_released() {
            return;
        }

        let is_buffering = engine_state.is_buffering();
        let changed = self.shared.state.update_if(|state| match state {
            PlaybackUiState::Loaded(session) if session.is_buffering != is_buffering => {
                session.is_buffering = is_buffering;
                true
            }
            _ => false,
        });

        if changed {
            debug!(video_id = %self.shared.video_id, ?engine_state, "Buffering changed");
            self.shared.emit(PlaybackEvent::BufferingChanged {
                video_id: self.shared.video_id.clone(),
                is_buffering,
            });
        }
    }
}

pub struct PlaybackSessionController {
    shared: Arc<SessionShared>,
    repository: Arc<dyn VideoRepository>,
    engine: Arc<dyn PlaybackEngine>,
    /// Listener registration. Held while binding so teardown cannot interleave.
    listener: Mutex<Option<ListenerId>>,
    load_started: AtomicBool,
}

impl PlaybackSessionController {
    /// Attach to `engine` for `video_id`.
    ///
    /// Registers the state listener and stops the engine so nothing from a
    /// previous screen keeps playing. State starts at `Loading`.
    pub fn new(
        video_id: impl Into<String>,
        repository: Arc<dyn VideoRepository>,
        engine: Arc<dyn PlaybackEngine>,
        event_bus: EventBus,
    ) -> Self {
        let shared = Arc::new(SessionShared {
            video_id: video_id.into(),
            state: StateCell::new(PlaybackUiState::Loading),
            released: AtomicBool::new(false),
            event_bus,
        });

        let listener_id = engine.add_listener(Arc::new(SessionListener {
            shared: Arc::clone(&shared),
        }));
        engine.stop();

        debug!(video_id = %shared.video_id, %listener_id, "Playback session attached");

        Self {
            shared,
            repository,
            engine,
            listener: Mutex::new(Some(listener_id)),
            load_started: AtomicBool::new(false),
        }
    }

    /// Resolve the video and start playback.
    ///
    /// Runs once per session; later calls return immediately. A missing id
    /// moves the state to `Error("Video not found")`.
    #[instrument(skip(self), fields(video_id = %self.shared.video_id))]
    pub async fn load(&self) {
        if self.load_started.swap(true, Ordering::SeqCst) {
            debug!("Load already started");
            return;
        }

        match self.resolve().await {
            Ok(video) => self.bind(video),
            Err(e) => {
                warn!(error = %e, "Failed to resolve video");
                let message = e.to_string();
                if !self.shared.is_released() {
                    self.shared.state.set(PlaybackUiState::Error(message.clone()));
                }
                self.shared.emit(PlaybackEvent::SessionFailed {
                    video_id: self.shared.video_id.clone(),
                    message,
                });
            }
        }
    }

    async fn resolve(&self) -> Result<core_library::Video> {
        self.repository
            .find_by_id(&self.shared.video_id)
            .await?
            .ok_or_else(|| PlaybackError::VideoNotFound(self.shared.video_id.clone()))
    }

    fn bind(&self, video: core_library::Video) {
        let guard = self.listener.lock();
        if self.shared.is_released() || guard.is_none() {
            debug!("Session released during lookup; not binding");
            return;
        }

        let source = MediaSource::new(video.video_url.clone()).with_title(video.title.clone());
        self.engine.bind(&source);
        self.engine.prepare();
        self.engine.set_play_when_ready(true);

        self.shared
            .state
            .set(PlaybackUiState::Loaded(LoadedSession::starting(video)));
        drop(guard);

        info!(uri = %source.uri, "Playback started");
        self.shared.emit(PlaybackEvent::SessionOpened {
            video_id: self.shared.video_id.clone(),
        });
    }

    /// Flip the fullscreen flag. Ignored unless `Loaded`.
    pub fn on_fullscreen_toggled(&self) {
        if self.shared.is_released() {
            return;
        }

        let mut is_fullscreen = false;
        let changed = self.shared.state.update_if(|state| match state {
            PlaybackUiState::Loaded(session) => {
                session.is_fullscreen = !session.is_fullscreen;
                is_fullscreen = session.is_fullscreen;
                true
            }
            _ => false,
        });

        if changed {
            self.shared.emit(PlaybackEvent::FullscreenChanged {
                video_id: self.shared.video_id.clone(),
                is_fullscreen,
            });
        } else {
            debug!(state = ?self.shared.state.get(), "Fullscreen toggle ignored");
        }
    }

    /// Stop the engine and detach the listener.
    ///
    /// Safe to call any number of times; only the first call acts.
    pub fn release(&self) {
        if self.shared.released.swap(true, Ordering::SeqCst) {
            return;
        }

        let listener_id = self.listener.lock().take();
        self.engine.stop();
        if let Some(id) = listener_id {
            self.engine.remove_listener(id);
        }

        info!(video_id = %self.shared.video_id, "Playback session released");
        self.shared.emit(PlaybackEvent::SessionReleased {
            video_id: self.shared.video_id.clone(),
        });
    }

    pub fn state(&self) -> PlaybackUiState {
        self.shared.state.get()
    }

    pub fn subscribe_state(&self) -> StateReceiver<PlaybackUiState> {
        self.shared.state.subscribe()
    }

    pub fn video_id(&self) -> &str {
        &self.shared.video_id
    }

    pub fn is_released(&self) -> bool {
        self.shared.is_released()
    }
}

impl Drop for PlaybackSessionController {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for PlaybackSessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackSessionController")
            .field("video_id", &self.shared.video_id)
            .field("state", &self.shared.state.get())
            .field("released", &self.shared.is_released())
            .finish()
    }
}
