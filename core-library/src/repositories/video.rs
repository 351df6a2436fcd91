//! Video cache repository trait and implementation

use crate::error::{LibraryError, Result};
use crate::models::Video;
use async_trait::async_trait;
use core_async::sync::watch;
use sqlx::{query_as, SqlitePool};
use tracing::{debug, instrument};

/// Observable view of the full cached list.
///
/// The first [`next`](Self::next) yields the snapshot current at subscription
/// time. Each later call waits for the next published snapshot. Snapshots
/// published faster than the consumer reads are coalesced into the latest.
#[derive(Debug)]
pub struct VideoListStream {
    receiver: watch::Receiver<Vec<Video>>,
    primed: bool,
}

impl VideoListStream {
    /// Wrap a watch receiver. Used by alternative repository implementations.
    pub fn from_receiver(receiver: watch::Receiver<Vec<Video>>) -> Self {
        Self {
            receiver,
            primed: false,
        }
    }

    /// Next snapshot, or `None` once the repository has gone away.
    pub async fn next(&mut self) -> Option<Vec<Video>> {
        if !self.primed {
            self.primed = true;
            return Some(self.receiver.borrow_and_update().clone());
        }
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

/// Video cache interface
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Subscribe to the full cached list.
    async fn observe_all(&self) -> Result<VideoListStream>;

    /// Find a video by its ID
    ///
    /// # Returns
    /// - `Ok(Some(video))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: &str) -> Result<Option<Video>>;

    /// Every cached video in insertion order.
    async fn find_all(&self) -> Result<Vec<Video>>;

    /// Upsert a batch in one transaction. Rows with an existing id are
    /// replaced and move to the end of insertion order.
    ///
    /// An empty batch is a no-op and notifies no observers.
    ///
    /// # Errors
    /// Returns `InvalidInput` without writing anything if any video fails
    /// validation.
    async fn insert_or_replace_all(&self, videos: &[Video]) -> Result<usize>;

    /// Remove every cached video, returning how many rows were deleted.
    async fn clear_all(&self) -> Result<u64>;

    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of VideoRepository
pub struct SqliteVideoRepository {
    pool: SqlitePool,
    snapshot: watch::Sender<Vec<Video>>,
}

impl SqliteVideoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self { pool, snapshot }
    }

    /// Re-read the table and hand the result to observers if it changed.
    async fn publish(&self) -> Result<()> {
        let videos = self.find_all().await?;
        let total = videos.len();
        let changed = self.snapshot.send_if_modified(|current| {
            if *current == videos {
                false
            } else {
                *current = videos;
                true
            }
        });
        debug!(total, changed, "Published video snapshot");
        Ok(())
    }
}

#[async_trait]
impl VideoRepository for SqliteVideoRepository {
    async fn observe_all(&self) -> Result<VideoListStream> {
        self.publish().await?;
        Ok(VideoListStream::from_receiver(self.snapshot.subscribe()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Video>> {
        let video = query_as::<_, Video>("SELECT * FROM videos WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn find_all(&self) -> Result<Vec<Video>> {
        let videos = query_as::<_, Video>("SELECT * FROM videos ORDER BY rowid ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    #[instrument(skip(self, videos), fields(batch = videos.len()))]
    async fn insert_or_replace_all(&self, videos: &[Video]) -> Result<usize> {
        if videos.is_empty() {
            return Ok(0);
        }

        for video in videos {
            video.validate().map_err(|msg| LibraryError::InvalidInput {
                field: "video".to_string(),
                message: msg,
            })?;
        }

        let mut tx = self.pool.begin().await?;
        for video in videos {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO videos (
                    id, title, thumbnail_url, duration, upload_time, views,
                    author, video_url, description, subscriber, is_live
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&video.id)
            .bind(&video.title)
            .bind(&video.thumbnail_url)
            .bind(&video.duration)
            .bind(&video.upload_time)
            .bind(&video.views)
            .bind(&video.author)
            .bind(&video.video_url)
            .bind(&video.description)
            .bind(&video.subscriber)
            .bind(video.is_live)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(written = videos.len(), "Cached videos");
        self.publish().await?;
        Ok(videos.len())
    }

    async fn clear_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM videos")
            .execute(&self.pool)
            .await?;

        self.publish().await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn create_test_video(id: &str, title: &str) -> Video {
        Video {
            id: id.to_string(),
            title: title.to_string(),
            thumbnail_url: format!("https://example.com/{id}.jpg"),
            duration: "3:21".to_string(),
            upload_time: "Jan 1, 2024".to_string(),
            views: "1,024".to_string(),
            author: "Test Author".to_string(),
            video_url: format!("https://example.com/{id}.mp4"),
            description: format!("Description of {title}"),
            subscriber: "42 Subscribers".to_string(),
            is_live: false,
        }
    }

    async fn create_repo() -> SqliteVideoRepository {
        SqliteVideoRepository::new(create_test_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let repo = create_repo().await;
        let mut video = create_test_video("a", "Alpha");
        video.is_live = true;

        let written = repo.insert_or_replace_all(&[video.clone()]).await.unwrap();
        assert_eq!(written, 1);

        let found = repo.find_by_id("a").await.unwrap();
        assert_eq!(found, Some(video));
        assert_eq!(repo.find_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = create_repo().await;
        let batch = vec![
            create_test_video("3", "Charlie"),
            create_test_video("1", "Alpha"),
            create_test_video("2", "Bravo"),
        ];
        repo.insert_or_replace_all(&batch).await.unwrap();

        let ids: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_existing_row() {
        let repo = create_repo().await;
        repo.insert_or_replace_all(&[create_test_video("1", "Old")])
            .await
            .unwrap();
        repo.insert_or_replace_all(&[create_test_video("1", "New")])
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let video = repo.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(video.title, "New");
    }

    #[tokio::test]
    async fn test_invalid_batch_writes_nothing() {
        let repo = create_repo().await;
        let batch = vec![create_test_video("1", "Ok"), create_test_video("", "Bad")];

        let result = repo.insert_or_replace_all(&batch).await;
        assert!(matches!(result, Err(LibraryError::InvalidInput { .. })));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let repo = create_repo().await;
        repo.insert_or_replace_all(&[create_test_video("1", "A"), create_test_video("2", "B")])
            .await
            .unwrap();

        assert_eq!(repo.clear_all().await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_observe_all_yields_current_then_updates() {
        let repo = create_repo().await;
        repo.insert_or_replace_all(&[create_test_video("1", "First")])
            .await
            .unwrap();

        let mut stream = repo.observe_all().await.unwrap();
        let initial = stream.next().await.unwrap();
        assert_eq!(initial.len(), 1);

        repo.insert_or_replace_all(&[create_test_video("2", "Second")])
            .await
            .unwrap();
        let updated = stream.next().await.unwrap();
        assert_eq!(updated.len(), 2);

        repo.clear_all().await.unwrap();
        assert!(stream.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_publishes_nothing() {
        let repo = create_repo().await;
        let mut stream = repo.observe_all().await.unwrap();
        assert!(stream.next().await.unwrap().is_empty());

        assert_eq!(repo.insert_or_replace_all(&[]).await.unwrap(), 0);
        assert!(!stream.receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_stream_ends_when_repository_dropped() {
        let repo = create_repo().await;
        let mut stream = repo.observe_all().await.unwrap();
        assert!(stream.next().await.is_some());

        drop(repo);
        assert!(stream.next().await.is_none());
    }
}
