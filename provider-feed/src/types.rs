//! Feed wire types
//!
//! The feed is a single JSON array of video objects with camelCase keys.

use bridge_traits::feed::RemoteVideo;
use serde::{Deserialize, Serialize};

/// One video object as it appears in the feed document.
///
/// Display fields the server omits decode as empty strings; `isLive`
/// defaults to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub upload_time: String,
    #[serde(default)]
    pub views: String,
    #[serde(default)]
    pub author: String,
    pub video_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subscriber: String,
    #[serde(default)]
    pub is_live: bool,
}

impl From<VideoDto> for RemoteVideo {
    fn from(dto: VideoDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            thumbnail_url: dto.thumbnail_url,
            duration: dto.duration,
            upload_time: dto.upload_time,
            views: dto.views,
            author: dto.author,
            video_url: dto.video_url,
            description: dto.description,
            subscriber: dto.subscriber,
            is_live: dto.is_live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case_object() {
        let json = r#"{
            "id": "1",
            "title": "Big Buck Bunny",
            "thumbnailUrl": "https://example.com/bbb.jpg",
            "duration": "8:18",
            "uploadTime": "May 9, 2011",
            "views": "24,969,123",
            "author": "Vlc Media Player",
            "videoUrl": "https://example.com/bbb.mp4",
            "description": "Big Buck Bunny tells the story of a giant rabbit",
            "subscriber": "25254545 Subscribers",
            "isLive": true
        }"#;

        let dto: VideoDto = serde_json::from_str(json).unwrap();
        let video = RemoteVideo::from(dto);
        assert_eq!(video.thumbnail_url, "https://example.com/bbb.jpg");
        assert_eq!(video.upload_time, "May 9, 2011");
        assert_eq!(video.video_url, "https://example.com/bbb.mp4");
        assert!(video.is_live);
    }

    #[test]
    fn test_missing_display_fields_default() {
        let json = r#"{"id": "2", "title": "Sintel", "videoUrl": "https://example.com/s.mp4"}"#;
        let dto: VideoDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.author, "");
        assert!(!dto.is_live);
    }

    #[test]
    fn test_missing_video_url_is_rejected() {
        let json = r#"{"id": "3", "title": "No stream"}"#;
        assert!(serde_json::from_str::<VideoDto>(json).is_err());
    }
}
