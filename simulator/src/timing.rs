//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the core crate.

use std::time::Duration;

use roboeyes::config::MAX_FPS;

/// Target frame time. The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(1000 / MAX_FPS as u64);

/// How often the overlay text is refreshed.
pub const OVERLAY_REFRESH: Duration = Duration::from_millis(250);
