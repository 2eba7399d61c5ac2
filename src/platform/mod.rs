//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, a manual pump natively)
//! - Driving the page simulation from frame callbacks

pub mod frames;

pub use frames::{Driver, FrameScheduler, ManualScheduler};
