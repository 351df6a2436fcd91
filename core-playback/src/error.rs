//! # Playback Error Types

use thiserror::Error;

/// Errors raised while resolving a playback session.
///
/// The display text is what the player screen shows in its error state.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The requested id is not in the local cache.
    #[error("Video not found")]
    VideoNotFound(String),

    #[error("Cache error: {0}")]
    Library(#[from] core_library::LibraryError),
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
