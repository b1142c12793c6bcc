//! Color constants for the eyes.
//!
//! The renderer only ever uses two colors per instance: a background color for
//! clearing dirty regions and a foreground color for the eye shapes, lid lines
//! and sweat drops. Both live in [`EyesConfig`](crate::EyesConfig) so two
//! engines on two displays never share color state.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to ST7789-class displays and needs no conversion
//! when written to the display buffer.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Default background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31).
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Cyan (0, 63, 31). Default eye color.
pub const CYAN: Rgb565 = Rgb565::CYAN;

// =============================================================================
// Custom Colors
// =============================================================================

/// Dark gray for overlay text and dividers.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Warm amber, a softer alternative eye color for dark rooms.
pub const AMBER: Rgb565 = Rgb565::new(31, 40, 0);

/// Default background color.
pub const DEFAULT_BACKGROUND: Rgb565 = BLACK;

/// Default foreground (eye) color.
pub const DEFAULT_FOREGROUND: Rgb565 = CYAN;
