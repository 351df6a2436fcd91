//! Feed connector implementation
//!
//! Implements `RemoteFeedClient` by fetching the whole feed document in one
//! GET and decoding it as a JSON array.

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::feed::{RemoteFeedClient, RemoteVideo};
use bridge_traits::http::{HttpClient, HttpRequest, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::FeedError;
use crate::types::VideoDto;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote video feed connector
///
/// # Example
///
/// ```ignore
/// use provider_feed::FeedConnector;
/// use bridge_traits::feed::RemoteFeedClient;
///
/// let connector = FeedConnector::new(http_client, feed_url);
/// let videos = connector.fetch_all().await?;
/// ```
pub struct FeedConnector {
    http_client: Arc<dyn HttpClient>,
    feed_url: String,
    retry_policy: RetryPolicy,
    request_timeout: Duration,
}

impl FeedConnector {
    pub fn new(http_client: Arc<dyn HttpClient>, feed_url: impl Into<String>) -> Self {
        Self {
            http_client,
            feed_url: feed_url.into(),
            retry_policy: RetryPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    fn decode(body: &[u8]) -> std::result::Result<Vec<RemoteVideo>, FeedError> {
        let dtos: Vec<VideoDto> = serde_json::from_slice(body)
            .map_err(|e| FeedError::Parse(e.to_string()))?;
        Ok(dtos.into_iter().map(RemoteVideo::from).collect())
    }
}

#[async_trait]
impl RemoteFeedClient for FeedConnector {
    #[instrument(skip(self), fields(url = %self.feed_url))]
    async fn fetch_all(&self) -> Result<Vec<RemoteVideo>> {
        let request = HttpRequest::get(self.feed_url.clone())
            .header("Accept", "application/json")
            .timeout(self.request_timeout);

        let response = self
            .http_client
            .execute_with_retry(request, self.retry_policy.clone())
            .await?;

        if !response.is_success() {
            warn!(status = response.status, "Feed request rejected");
            return Err(FeedError::Http {
                status: response.status,
            }
            .into());
        }

        debug!(bytes = response.body.len(), "Decoding feed response");
        let videos = Self::decode(&response.body).map_err(|e| {
            warn!(error = %e, "Feed response could not be decoded");
            e
        })?;

        info!(count = videos.len(), "Fetched remote feed");
        Ok(videos)
    }
}
