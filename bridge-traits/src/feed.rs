//! Remote Feed Abstraction
//!
//! Contract for fetching the full video catalogue from a remote source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A video as delivered by the remote feed.
///
/// Every field is carried through to the local cache unchanged; display
/// fields (duration, views, upload time) stay as the server formatted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVideo {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub upload_time: String,
    pub views: String,
    pub author: String,
    pub video_url: String,
    pub description: String,
    pub subscriber: String,
    pub is_live: bool,
}

/// Remote feed client trait
///
/// Implementations fetch the complete list in one call. Transport and
/// decoding failures are reported as [`BridgeError`](crate::error::BridgeError)
/// whose display text is suitable for showing to the user.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::feed::RemoteFeedClient;
///
/// async fn count(client: &dyn RemoteFeedClient) -> Result<usize> {
///     Ok(client.fetch_all().await?.len())
/// }
/// ```
#[async_trait]
pub trait RemoteFeedClient: Send + Sync {
    /// Fetch every video currently published by the feed.
    async fn fetch_all(&self) -> Result<Vec<RemoteVideo>>;
}
