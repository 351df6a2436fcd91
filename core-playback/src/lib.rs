//! # Playback Session
//!
//! Drives a host playback engine for the player screen.
//!
//! ## Overview
//!
//! This crate handles:
//! - Resolving a video id against the local cache
//! - Binding the resolved media to the injected engine and starting playback
//! - Mirroring engine buffering and the fullscreen flag into observable state
//! - Stopping the engine and detaching from it exactly once on teardown
//!
//! ## Usage
//!
//! ```ignore
//! let session = Arc::new(PlaybackSessionController::new(
//!     "42", repository, engine, event_bus,
//! ));
//! tokio::spawn({
//!     let session = Arc::clone(&session);
//!     async move { session.load().await }
//! });
//!
//! let mut state = session.subscribe_state();
//! ```

pub mod error;
pub mod session;
pub mod state;

pub use error::{PlaybackError, Result};
pub use session::PlaybackSessionController;
pub use state::{LoadedSession, PlaybackUiState};
