//! Animated robot eyes for small raster displays.
//!
//! This crate drives a pair of stylized eyes on an abstract drawing surface
//! to convey mood and attention. It contains the platform-agnostic core that
//! runs both on the desktop simulator and on embedded targets:
//!
//! - [`geometry`]: Eye geometry model (current, previous and target values)
//! - [`expression`]: Mood and gaze position tables
//! - [`behavior`]: Autonomous behavior timers, blink and gesture state machines
//! - [`sweat`]: Sweat drop simulation
//! - [`engine`]: The per-tick animation update engine ([`RoboEyes`])
//! - [`render`]: Dirty-region planner and shape drawing
//! - [`surface`]: The drawing capabilities the renderer needs
//! - [`config`]: Default constants and per-instance configuration
//! - [`profiling`]: Event log ring buffer and render counters
//!
//! # Usage
//!
//! ```ignore
//! let surface = GraphicsSurface::new(display);
//! let mut eyes = RoboEyes::new(surface, SmallRng::seed_from_u64(7), EyesConfig::default())?;
//! eyes.begin(now_ms());
//! eyes.set_mood(Mood::Happy);
//! loop {
//!     eyes.update(now_ms());
//! }
//! ```
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` (tests run on the host with `std`). It never
//! allocates: logs and queues use `heapless` containers and time is injected
//! by the caller as milliseconds.
//!
//! # Testing
//!
//! ```bash
//! cargo test --lib
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod behavior;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod expression;
pub mod geometry;
pub mod profiling;
pub mod render;
pub mod surface;
pub mod sweat;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use behavior::Axis;
pub use config::EyesConfig;
pub use engine::RoboEyes;
pub use error::EyesError;
pub use expression::{Mood, Position};
pub use geometry::{Eye, EyeSelect, EyeSide};
pub use surface::{GraphicsSurface, Surface};
