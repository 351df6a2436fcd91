//! # Remote Video Feed Provider
//!
//! Implements `RemoteFeedClient` over a plain JSON document served by HTTP.
//!
//! ## Overview
//!
//! This crate provides:
//! - `FeedConnector`, which GETs the feed URL and decodes the video array
//! - Wire types mirroring the feed's camelCase JSON
//! - Status and decode failures mapped to user-facing messages

pub mod connector;
pub mod error;
pub mod types;

pub use connector::FeedConnector;
pub use error::{FeedError, Result};
