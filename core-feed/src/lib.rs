//! # Home Feed
//!
//! Reconciles the cached video list, the connectivity signal and user
//! commands into one observable screen state.
//!
//! ## Overview
//!
//! - [`FeedReconciler`]: single-writer worker owning the home screen state
//! - [`FeedUiState`]: the closed set of states the screen can render
//! - [`NavigationEvent`]: one-shot requests to open the player
//! - [`CarouselSampler`]: random carousel picks, redrawn on every cache change

pub mod carousel;
pub mod reconciler;
pub mod state;

pub use carousel::CarouselSampler;
pub use reconciler::{FeedDependencies, FeedReconciler};
pub use state::{FeedUiState, LoadedFeed, NavigationEvent, GENERIC_FAILURE, NO_VIDEOS_FOUND};
