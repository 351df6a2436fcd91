//! # Host Bridge Traits
//!
//! Capability contracts the video feed core needs from its host.
//!
//! ## Overview
//!
//! Each trait is a seam where a platform plugs in its own implementation
//! (Android, iOS, desktop). The core never talks to the platform except
//! through these traits, and fails fast with a descriptive error when a
//! required capability is missing.
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP with optional retry policy
//! - [`RemoteFeedClient`](feed::RemoteFeedClient) - Fetch the remote video catalogue
//! - [`NetworkMonitor`](network::NetworkMonitor) - Connectivity signal
//!
//! ### Playback
//! - [`PlaybackEngine`](playback::PlaybackEngine) - Host media player commands
//! - [`EngineListener`](playback::EngineListener) - Player state notifications
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Desktop  | `bridge-desktop`    |
//! | Android  | host-provided (JNI) |
//! | iOS      | host-provided       |
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind an `Arc`.

pub mod error;
pub mod feed;
pub mod http;
pub mod network;
pub mod playback;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use feed::{RemoteFeedClient, RemoteVideo};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use network::{NetworkChangeStream, NetworkInfo, NetworkMonitor, NetworkStatus, NetworkType};
pub use playback::{EngineListener, EngineState, ListenerId, MediaSource, PlaybackEngine};
pub use time::{Clock, FixedClock, LogEntry, LogLevel, LoggerSink, SystemClock};
