//! Player screen state.

use core_library::Video;
use serde::Serialize;

/// What the player screen renders.
///
/// Starts at `Loading`, resolves once to `Loaded` or `Error`, and never goes
/// back to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data")]
pub enum PlaybackUiState {
    Loading,
    Error(String),
    Loaded(LoadedSession),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedSession {
    pub video: Video,
    pub is_buffering: bool,
    /// Drives system chrome and orientation lock in the presentation layer.
    pub is_fullscreen: bool,
}

impl LoadedSession {
    pub(crate) fn starting(video: Video) -> Self {
        Self {
            video,
            is_buffering: true,
            is_fullscreen: false,
        }
    }
}

impl PlaybackUiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PlaybackUiState::Loading)
    }

    pub fn as_loaded(&self) -> Option<&LoadedSession> {
        match self {
            PlaybackUiState::Loaded(session) => Some(session),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            PlaybackUiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> Video {
        Video {
            id: "1".to_string(),
            title: "Intro".to_string(),
            thumbnail_url: String::new(),
            duration: "1:00".to_string(),
            upload_time: String::new(),
            views: "0".to_string(),
            author: "Studio".to_string(),
            video_url: "https://cdn.example.com/1.mp4".to_string(),
            description: String::new(),
            subscriber: String::new(),
            is_live: false,
        }
    }

    #[test]
    fn test_starting_session_is_buffering_windowed() {
        let session = LoadedSession::starting(video());
        assert!(session.is_buffering);
        assert!(!session.is_fullscreen);
    }

    #[test]
    fn test_accessors() {
        assert!(PlaybackUiState::Loading.is_loading());
        assert_eq!(
            PlaybackUiState::Error("Video not found".to_string()).error_message(),
            Some("Video not found")
        );
        let loaded = PlaybackUiState::Loaded(LoadedSession::starting(video()));
        assert_eq!(loaded.as_loaded().map(|s| s.video.id.as_str()), Some("1"));
        assert!(loaded.error_message().is_none());
    }
}
