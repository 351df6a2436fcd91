//! Playback engine bridge.
//!
//! Mirrors the command surface of a host media player (ExoPlayer on Android,
//! AVPlayer on iOS). Commands are synchronous because host players accept
//! them on the calling thread and report progress through listeners.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Media the engine should play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Playable media locator (HTTP(S) URL or host-specific URI).
    pub uri: String,
    /// Optional display title for host media sessions.
    pub title: Option<String>,
}

impl MediaSource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Determine whether the source represents remote content.
    pub fn is_remote(&self) -> bool {
        self.uri.starts_with("http://") || self.uri.starts_with("https://")
    }
}

/// Engine lifecycle state as reported by the host player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Idle,
    Buffering,
    Ready,
    Ended,
}

impl EngineState {
    pub fn is_buffering(self) -> bool {
        matches!(self, EngineState::Buffering)
    }
}

/// Handle returned by [`PlaybackEngine::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Generate a new listener identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Receives engine state-change notifications.
///
/// Hosts may invoke listeners from any thread.
pub trait EngineListener: Send + Sync {
    fn on_state_changed(&self, state: EngineState);
}

/// Host playback engine.
///
/// The engine is owned by the host; callers only drive playback and manage
/// their own listener registrations. Engine-internal failures are the host's
/// concern and surface, if at all, as state changes.
pub trait PlaybackEngine: Send + Sync {
    /// Replace the current media item.
    fn bind(&self, source: &MediaSource);

    /// Start loading the bound media.
    fn prepare(&self);

    /// Start playback as soon as enough media is buffered.
    fn set_play_when_ready(&self, play_when_ready: bool);

    /// Stop playback and release decoder resources held for the current item.
    fn stop(&self);

    /// Register a state listener.
    fn add_listener(&self, listener: Arc<dyn EngineListener>) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_source() {
        let source = MediaSource::new("https://cdn.example.com/a.mp4").with_title("A");
        assert!(source.is_remote());
        assert_eq!(source.title.as_deref(), Some("A"));
        assert!(!MediaSource::new("content://media/1").is_remote());
    }

    #[test]
    fn test_only_buffering_maps_to_buffering() {
        assert!(EngineState::Buffering.is_buffering());
        for state in [EngineState::Idle, EngineState::Ready, EngineState::Ended] {
            assert!(!state.is_buffering());
        }
    }

    #[test]
    fn test_listener_ids_are_unique() {
        assert_ne!(ListenerId::new(), ListenerId::new());
    }
}
