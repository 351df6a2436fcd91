//! # Video Library
//!
//! Owns the local video cache and the read-side helpers built on it.
//!
//! ## Overview
//!
//! This crate manages:
//! - The [`Video`](models::Video) model and its mapping from the remote feed
//! - SQLite pool setup and embedded migrations ([`db`])
//! - The cache store ([`repositories::VideoRepository`]) with an observable list
//! - Search and sort projections used by the feed screen ([`query`])

pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

pub use error::{LibraryError, Result};
pub use models::Video;
pub use repositories::{SqliteVideoRepository, VideoListStream, VideoRepository};
