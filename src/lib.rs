//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-service`, `core-feed`, `core-playback`).
//! Host applications can depend on `vidfeed-workspace` and enable the
//! documented features without wiring each crate individually.
