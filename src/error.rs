//! Construction-time errors.
//!
//! The animation itself has no failure modes: bad runtime inputs are clamped
//! and drawing errors are dropped. The only fatal conditions are a display that
//! cannot be drawn on and a screen configuration with no area, both rejected
//! by [`RoboEyes::new`](crate::RoboEyes::new) before the first tick.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EyesError {
    /// The drawing surface reports a zero width or height.
    #[error("display surface has no drawable area")]
    EmptySurface,

    /// The configured screen has a zero dimension.
    #[error("invalid screen size {width}x{height}")]
    InvalidScreen { width: u32, height: u32 },
}
