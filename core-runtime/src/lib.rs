//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the video feed core:
//! - Logging and tracing bootstrap
//! - Configuration and capability validation
//! - Diagnostic event bus
//! - Observable state cells and one-shot event channels
//!
//! Every other core crate depends on this one for its conventions; it has no
//! knowledge of videos itself.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod observable;

pub use error::{Error, Result};
pub use observable::{OneShotChannel, OneShotReceiver, StateCell, StateReceiver};
