//! Domain model for cached videos.

use bridge_traits::feed::RemoteVideo;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry of the video feed as stored in the local cache.
///
/// Every field is carried as the remote feed provides it; `duration`,
/// `views` and `subscriber` are display strings, not numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Video {
    /// Stable identifier, unique within the cache
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub upload_time: String,
    pub views: String,
    pub author: String,
    /// Stream location handed to the playback engine
    pub video_url: String,
    pub description: String,
    pub subscriber: String,
    pub is_live: bool,
}

impl Video {
    /// Validate video data before it is written to the cache.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Video id cannot be empty".to_string());
        }
        Ok(())
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

impl From<RemoteVideo> for Video {
    fn from(remote: RemoteVideo) -> Self {
        Self {
            id: remote.id,
            title: remote.title,
            thumbnail_url: remote.thumbnail_url,
            duration: remote.duration,
            upload_time: remote.upload_time,
            views: remote.views,
            author: remote.author,
            video_url: remote.video_url,
            description: remote.description,
            subscriber: remote.subscriber,
            is_live: remote.is_live,
        }
    }
}
