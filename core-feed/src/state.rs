//! Home screen state types.

use core_library::Video;
use serde::Serialize;

/// Shown when the cache is empty while online and no refresh is pending.
pub const NO_VIDEOS_FOUND: &str = "No videos found.";

/// Fallback for failures that carry no description.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Everything the home screen renders. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data")]
pub enum FeedUiState {
    /// No data yet and a refresh may still be in flight.
    Loading,
    /// The cache is empty and the device is offline.
    NoInternet,
    /// A refresh failed and there is nothing cached to fall back on.
    Error(String),
    Loaded(LoadedFeed),
}

/// Payload of [`FeedUiState::Loaded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedFeed {
    /// The list as currently shown, after search and sort.
    pub videos: Vec<Video>,
    /// Random sample of the cache, independent of search and sort.
    pub carousel_videos: Vec<Video>,
    /// Showing cached data without connectivity.
    pub is_offline: bool,
    /// Text in the search field. May run ahead of `videos` while a debounced
    /// search is pending.
    pub search_input: String,
    pub is_sorted: bool,
}

impl FeedUiState {
    /// Variant name, used in logs and events.
    pub fn name(&self) -> &'static str {
        match self {
            FeedUiState::Loading => "Loading",
            FeedUiState::NoInternet => "NoInternet",
            FeedUiState::Error(_) => "Error",
            FeedUiState::Loaded(_) => "Loaded",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeedUiState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FeedUiState::Loaded(_))
    }

    pub fn as_loaded(&self) -> Option<&LoadedFeed> {
        match self {
            FeedUiState::Loaded(feed) => Some(feed),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FeedUiState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// `Error` and `NoInternet` both offer the user a retry action.
    pub fn offers_retry(&self) -> bool {
        matches!(self, FeedUiState::Error(_) | FeedUiState::NoInternet)
    }
}

/// One-shot request for the presentation layer to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Open the player for this video.
    OpenVideo(Video),
}

impl NavigationEvent {
    pub fn video(&self) -> &Video {
        match self {
            NavigationEvent::OpenVideo(video) => video,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_offered_for_error_and_offline() {
        assert!(FeedUiState::NoInternet.offers_retry());
        assert!(FeedUiState::Error(NO_VIDEOS_FOUND.to_string()).offers_retry());
        assert!(!FeedUiState::Loading.offers_retry());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(FeedUiState::Error("boom".to_string())).unwrap();
        assert_eq!(json["state"], "Error");
        assert_eq!(json["data"], "boom");

        let json = serde_json::to_value(FeedUiState::Loading).unwrap();
        assert_eq!(json["state"], "Loading");
    }
}
