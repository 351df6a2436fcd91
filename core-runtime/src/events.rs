//! # Event Bus System
//!
//! Diagnostic event stream for the video feed core, built on
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! Screens and background jobs publish typed events here so hosts can log,
//! trace or display them without coupling to the producers:
//!
//! ```text
//! ┌──────────────────┐   emit   ┌───────────┐  subscribe  ┌────────────┐
//! │ FeedSynchronizer ├─────────>│           ├────────────>│ Subscriber │
//! └──────────────────┘          │ EventBus  │             └────────────┘
//! ┌──────────────────┐   emit   │ (broadcast│  subscribe  ┌────────────┐
//! │  FeedReconciler  ├─────────>│  channel) ├────────────>│ Subscriber │
//! └──────────────────┘          │           │             └────────────┘
//! ┌──────────────────┐   emit   │           │
//! │ PlaybackSession  ├─────────>│           │
//! └──────────────────┘          └───────────┘
//! ```
//!
//! Emitting with no subscribers returns an error that producers ignore with
//! `.ok()`; events are diagnostics, never control flow.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CoreEvent, EventBus, FeedEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! event_bus
//!     .emit(CoreEvent::Feed(FeedEvent::ConnectivityChanged { online: false }))
//!     .ok();
//!
//! let event = stream.recv().await.unwrap();
//! assert_eq!(event.description(), "Connectivity changed");
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber fell behind and missed `n`
//!   events. Non-fatal.
//! - **`RecvError::Closed`**: every sender is gone; treat as shutdown.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Remote feed synchronization
    Sync(SyncEvent),
    /// Home feed screen
    Feed(FeedEvent),
    /// Player screen
    Playback(PlaybackEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Sync(e) => e.description(),
            CoreEvent::Feed(e) => e.description(),
            CoreEvent::Playback(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Sync(SyncEvent::Failed { .. }) => EventSeverity::Error,
            CoreEvent::Playback(PlaybackEvent::SessionFailed { .. }) => EventSeverity::Error,
            CoreEvent::Feed(FeedEvent::SelectionSuppressed { .. }) => EventSeverity::Warning,
            CoreEvent::Sync(SyncEvent::Completed { .. }) => EventSeverity::Info,
            CoreEvent::Feed(FeedEvent::StateChanged { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Sync Events
// ============================================================================

/// Fetch-and-persist runs against the remote feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SyncEvent {
    /// A refresh started.
    Started {
        job_id: String,
    },
    /// Remote videos were written to the cache.
    Completed {
        job_id: String,
        /// Videos returned by the feed.
        fetched: u64,
        /// Rows written to the cache.
        written: u64,
        duration_ms: u64,
    },
    /// The refresh failed; the cache was left untouched.
    Failed {
        job_id: String,
        message: String,
        /// Whether retrying can help (transport failures, timeouts).
        recoverable: bool,
    },
}

impl SyncEvent {
    fn description(&self) -> &str {
        match self {
            SyncEvent::Started { .. } => "Sync started",
            SyncEvent::Completed { .. } => "Sync completed successfully",
            SyncEvent::Failed { .. } => "Sync failed",
        }
    }
}

// ============================================================================
// Feed Events
// ============================================================================

/// Home feed screen activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum FeedEvent {
    /// The screen moved to a different state variant.
    StateChanged {
        from: String,
        to: String,
    },
    /// The connectivity signal flipped.
    ConnectivityChanged {
        online: bool,
    },
    /// A video was selected and navigation was requested.
    VideoSelected {
        video_id: String,
    },
    /// A video was selected while offline; no navigation happened.
    SelectionSuppressed {
        video_id: String,
    },
}

impl FeedEvent {
    fn description(&self) -> &str {
        match self {
            FeedEvent::StateChanged { .. } => "Feed state changed",
            FeedEvent::ConnectivityChanged { .. } => "Connectivity changed",
            FeedEvent::VideoSelected { .. } => "Video selected",
            FeedEvent::SelectionSuppressed { .. } => "Video selection suppressed while offline",
        }
    }
}

// ============================================================================
// Playback Events
// ============================================================================

/// Player screen lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// A video was bound to the engine.
    SessionOpened {
        video_id: String,
    },
    BufferingChanged {
        video_id: String,
        is_buffering: bool,
    },
    FullscreenChanged {
        video_id: String,
        is_fullscreen: bool,
    },
    /// The requested video could not be resolved.
    SessionFailed {
        video_id: String,
        message: String,
    },
    /// The engine was stopped and the listener detached.
    SessionReleased {
        video_id: String,
    },
}

impl PlaybackEvent {
    fn description(&self) -> &str {
        match self {
            PlaybackEvent::SessionOpened { .. } => "Playback session opened",
            PlaybackEvent::BufferingChanged { .. } => "Buffering changed",
            PlaybackEvent::FullscreenChanged { .. } => "Fullscreen toggled",
            PlaybackEvent::SessionFailed { .. } => "Playback session failed",
            PlaybackEvent::SessionReleased { .. } => "Playback session released",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for core events.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified per-subscriber buffer.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are none.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A `broadcast::Receiver` with an optional filter.
///
/// ```rust
/// use core_runtime::events::{CoreEvent, EventBus, EventStream};
///
/// let event_bus = EventBus::new(100);
/// let playback_only = EventStream::new(event_bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Playback(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` are returned.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &CoreEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive a matching event without waiting.
    ///
    /// Returns `None` if no matching events are currently buffered.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn started(job_id: &str) -> CoreEvent {
        CoreEvent::Sync(SyncEvent::Started {
            job_id: job_id.to_string(),
        })
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
        assert!(bus.emit(started("job-1")).is_err());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = CoreEvent::Playback(PlaybackEvent::SessionOpened {
            video_id: "1".to_string(),
        });
        assert_eq!(bus.emit(event.clone()).unwrap(), 2);

        assert_eq!(sub1.recv().await.unwrap(), event);
        assert_eq!(sub2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::new(10);
        let _early = bus.subscribe();
        bus.emit(started("job-1")).ok();

        let mut late = EventStream::new(bus.subscribe());
        assert!(late.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_event_stream_filter() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe())
            .filter(|event| matches!(event, CoreEvent::Feed(_)));

        bus.emit(started("job-1")).ok();
        let feed = CoreEvent::Feed(FeedEvent::VideoSelected {
            video_id: "7".to_string(),
        });
        bus.emit(feed.clone()).ok();

        assert_eq!(stream.recv().await.unwrap(), feed);
        assert!(stream.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_lagged_subscriber_reports_missed_events() {
        let bus = EventBus::new(2);
        let mut stream = EventStream::new(bus.subscribe());

        for i in 0..5 {
            bus.emit(started(&format!("job-{}", i))).ok();
        }

        assert!(matches!(stream.try_recv(), Some(Err(RecvError::Lagged(3)))));
    }

    #[test]
    fn test_severity() {
        let failed = CoreEvent::Sync(SyncEvent::Failed {
            job_id: "j".to_string(),
            message: "HTTP 500".to_string(),
            recoverable: true,
        });
        assert_eq!(failed.severity(), EventSeverity::Error);

        let suppressed = CoreEvent::Feed(FeedEvent::SelectionSuppressed {
            video_id: "1".to_string(),
        });
        assert_eq!(suppressed.severity(), EventSeverity::Warning);
        assert_eq!(started("j").severity(), EventSeverity::Debug);
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = CoreEvent::Playback(PlaybackEvent::FullscreenChanged {
            video_id: "3".to_string(),
            is_fullscreen: true,
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Playback");
        assert_eq!(json["payload"]["event"], "FullscreenChanged");
        assert_eq!(json["payload"]["is_fullscreen"], true);

        let back: CoreEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
