//! Read-side projections over a cached video list.
//!
//! The feed screen never re-queries the database for search or sort; it
//! projects its latest cache snapshot through these helpers instead.

use crate::models::Video;

/// Videos whose title or description contains `query`, ignoring case.
///
/// Input order is preserved. An empty query returns the full list.
pub fn filter_videos(videos: &[Video], query: &str) -> Vec<Video> {
    if query.is_empty() {
        return videos.to_vec();
    }
    videos.iter().filter(|v| v.matches(query)).cloned().collect()
}

/// Stable ascending sort by title.
///
/// Titles compare by their natural string order, so the sort is
/// case-sensitive and equal titles keep their relative order.
pub fn sort_by_title(videos: &mut [Video]) {
    videos.sort_by(|a, b| a.title.cmp(&b.title));
}

/// The list shown to the user: filtered by `query`, then sorted by title
/// when `sorted` is set.
pub fn project(videos: &[Video], query: &str, sorted: bool) -> Vec<Video> {
    let mut projected = filter_videos(videos, query);
    if sorted {
        sort_by_title(&mut projected);
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str, description: &str) -> Video {
        Video {
            id: id.to_string(),
            title: title.to_string(),
            thumbnail_url: String::new(),
            duration: "1:00".to_string(),
            upload_time: String::new(),
            views: "0".to_string(),
            author: "author".to_string(),
            video_url: format!("https://example.com/{id}.mp4"),
            description: description.to_string(),
            subscriber: String::new(),
            is_live: false,
        }
    }

    fn ids(videos: &[Video]) -> Vec<&str> {
        videos.iter().map(|v| v.id.as_str()).collect()
    }

    fn catalog() -> Vec<Video> {
        vec![
            video("1", "Zebra", "stripes"),
            video("2", "apple", "fruit"),
            video("3", "Mango", "Zebra crossing"),
            video("4", "Apple", "also fruit"),
        ]
    }

    #[test]
    fn test_filter_empty_query_returns_all_in_order() {
        let videos = catalog();
        assert_eq!(ids(&filter_videos(&videos, "")), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_filter_matches_title_or_description() {
        let videos = catalog();
        assert_eq!(ids(&filter_videos(&videos, "zebra")), vec!["1", "3"]);
        assert_eq!(ids(&filter_videos(&videos, "FRUIT")), vec!["2", "4"]);
        assert!(filter_videos(&videos, "kiwi").is_empty());
    }

    #[test]
    fn test_sort_is_case_sensitive_and_stable() {
        let mut videos = catalog();
        videos.push(video("5", "Apple", "duplicate"));
        sort_by_title(&mut videos);
        assert_eq!(ids(&videos), vec!["4", "5", "3", "1", "2"]);
    }

    #[test]
    fn test_project_filters_then_sorts() {
        let videos = catalog();
        assert_eq!(ids(&project(&videos, "zebra", true)), vec!["3", "1"]);
        assert_eq!(ids(&project(&videos, "zebra", false)), vec!["1", "3"]);
        assert_eq!(ids(&project(&videos, "", true)), vec!["4", "3", "1", "2"]);
    }
}
