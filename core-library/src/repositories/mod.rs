//! # Repository Pattern Implementation
//!
//! Repository traits and their SQLite implementations.
//!
//! - Traits define the interface so screens can be driven by fakes in tests
//! - SQLite implementations use sqlx for async database access
//! - All operations return `Result<T>`
//!
//! ## Available Repositories
//!
//! - `VideoRepository` - the local video cache with an observable list

pub mod video;

pub use video::{SqliteVideoRepository, VideoListStream, VideoRepository};
