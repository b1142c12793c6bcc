//! Configuration defaults and per-instance settings.
//!
//! - Compile-time defaults are plain `const` values so tuning one constant
//!   changes every engine that does not override it.
//! - [`EyesConfig`] is the per-instance configuration surface. Each engine
//!   owns its copy; runtime setters on [`RoboEyes`](crate::RoboEyes) mutate
//!   the same fields.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use crate::expression::{Mood, Position};

// =============================================================================
// Display Configuration
// =============================================================================

/// Default display width in pixels (ST7789 in landscape: 320x240).
pub const SCREEN_WIDTH: u32 = 320;

/// Default display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Default frame rate cap.
pub const MAX_FPS: u8 = 30;

// =============================================================================
// Eye Geometry Defaults
// =============================================================================

/// Nominal eye width in pixels.
pub const EYE_WIDTH: u32 = 40;

/// Nominal eye height in pixels.
pub const EYE_HEIGHT: u32 = 50;

/// Nominal corner radius in pixels.
pub const EYE_BORDER_RADIUS: u32 = 15;

/// Horizontal gap between the two eyes.
pub const SPACE_BETWEEN: i32 = 20;

/// Offset in pixels applied per axis when looking in a compass direction.
pub const MOVE_RANGE: i32 = 15;

/// Target height while curious and looking sideways.
pub const CURIOUS_HEIGHT: u32 = 60;

// =============================================================================
// Smoothing
// =============================================================================

/// Fraction of the remaining distance covered per tick by eye positions.
pub const POSITION_SPEED: f32 = 0.15;

/// Fraction of the remaining distance covered per tick by openness.
pub const OPEN_SPEED: f32 = 0.2;

/// Fraction of the remaining distance covered per tick by size and lid angles.
pub const SHAPE_SPEED: f32 = 0.2;

/// Distance below which a smoothed value counts as settled.
pub const SETTLE_EPSILON: f32 = 0.01;

// =============================================================================
// Behavior Timing
// =============================================================================

/// Duration of a full blink (close + open) in milliseconds.
pub const BLINK_DURATION_MS: u32 = 200;

/// Default auto blink interval in seconds.
pub const AUTOBLINK_INTERVAL_S: u16 = 3;

/// Default auto blink jitter in seconds.
pub const AUTOBLINK_VARIATION_S: u16 = 2;

/// Default idle repositioning interval in seconds.
pub const IDLE_INTERVAL_S: u16 = 5;

/// Default idle repositioning jitter in seconds.
pub const IDLE_VARIATION_S: u16 = 3;

/// Horizontal flicker amplitude of the "confused" gesture.
pub const CONFUSED_AMPLITUDE: u8 = 20;

/// Vertical flicker amplitude of the "laugh" gesture.
pub const LAUGH_AMPLITUDE: u8 = 5;

/// How long a confused or laugh gesture keeps flickering.
pub const GESTURE_DURATION_MS: u32 = 500;

/// Delay between two keyframes of a head shake.
pub const SHAKE_STEP_MS: u32 = 100;

/// Number of back-and-forth swings in a head shake.
pub const SHAKE_SWINGS: usize = 3;

// =============================================================================
// Rendering
// =============================================================================

/// Extra pixels added around each eye box on top of the corner radius so
/// rounded corners and lid lines never leave stale pixels.
pub const RENDER_PADDING: u32 = 6;

/// Scaled heights below this are drawn as a closed eye (nothing).
pub const VISIBILITY_FLOOR: u32 = 2;

/// Lid lines are drawn only when an angle magnitude exceeds this.
pub const LID_THRESHOLD: f32 = 0.1;

/// Number of simulated sweat drops.
pub const SWEAT_DROPS: usize = 3;

// =============================================================================
// Per-instance Configuration
// =============================================================================

/// Nominal size of one eye.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EyeDimensions {
    pub width: u32,
    pub height: u32,
    pub border_radius: u32,
}

impl EyeDimensions {
    /// Create eye dimensions.
    pub const fn new(
        width: u32,
        height: u32,
        border_radius: u32,
    ) -> Self {
        Self {
            width,
            height,
            border_radius,
        }
    }
}

impl Default for EyeDimensions {
    fn default() -> Self { Self::new(EYE_WIDTH, EYE_HEIGHT, EYE_BORDER_RADIUS) }
}

/// Settings of one jittered periodic behavior.
///
/// The behavior fires every `interval_ms + random(0..variation_ms)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerConfig {
    pub enabled: bool,
    pub interval_ms: u32,
    pub variation_ms: u32,
}

impl TimerConfig {
    /// Build from whole seconds, the unit used by the public setters.
    pub const fn from_secs(
        enabled: bool,
        interval_s: u16,
        variation_s: u16,
    ) -> Self {
        Self {
            enabled,
            interval_ms: interval_s as u32 * 1000,
            variation_ms: variation_s as u32 * 1000,
        }
    }
}

/// Complete configuration of one engine instance.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EyesConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub max_fps: u8,
    pub left: EyeDimensions,
    pub right: EyeDimensions,
    pub space_between: i32,
    pub cyclops: bool,
    pub mood: Mood,
    pub position: Position,
    pub curiosity: bool,
    pub sweat: bool,
    pub autoblink: TimerConfig,
    pub idle: TimerConfig,
    pub background: Rgb565,
    pub foreground: Rgb565,
}

impl EyesConfig {
    /// Configuration with all defaults: 320x240 at 30 FPS, autoblink and idle
    /// mode enabled.
    pub const fn new() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            max_fps: MAX_FPS,
            left: EyeDimensions::new(EYE_WIDTH, EYE_HEIGHT, EYE_BORDER_RADIUS),
            right: EyeDimensions::new(EYE_WIDTH, EYE_HEIGHT, EYE_BORDER_RADIUS),
            space_between: SPACE_BETWEEN,
            cyclops: false,
            mood: Mood::Default,
            position: Position::Default,
            curiosity: false,
            sweat: false,
            autoblink: TimerConfig::from_secs(true, AUTOBLINK_INTERVAL_S, AUTOBLINK_VARIATION_S),
            idle: TimerConfig::from_secs(true, IDLE_INTERVAL_S, IDLE_VARIATION_S),
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
        }
    }

    /// Same screen, no autonomous behavior. Useful for scripted animations.
    pub const fn quiet() -> Self {
        let mut config = Self::new();
        config.autoblink.enabled = false;
        config.idle.enabled = false;
        config
    }

    pub const fn with_screen(
        mut self,
        width: u32,
        height: u32,
    ) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    pub const fn with_max_fps(
        mut self,
        fps: u8,
    ) -> Self {
        self.max_fps = fps;
        self
    }

    pub const fn with_eyes(
        mut self,
        left: EyeDimensions,
        right: EyeDimensions,
    ) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    pub const fn with_space_between(
        mut self,
        space: i32,
    ) -> Self {
        self.space_between = space;
        self
    }

    pub const fn with_colors(
        mut self,
        background: Rgb565,
        foreground: Rgb565,
    ) -> Self {
        self.background = background;
        self.foreground = foreground;
        self
    }

    /// Milliseconds between two rendered frames (`1000 / max_fps`, integer).
    ///
    /// A zero frame rate is treated as 1 FPS.
    #[inline]
    pub const fn frame_interval_ms(&self) -> u32 {
        let fps = if self.max_fps == 0 { 1 } else { self.max_fps };
        1000 / fps as u32
    }

    /// Screen center in pixels.
    #[inline]
    pub const fn center(&self) -> (i32, i32) { ((self.screen_width / 2) as i32, (self.screen_height / 2) as i32) }
}

impl Default for EyesConfig {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        assert_eq!(EyesConfig::new().frame_interval_ms(), 33);
        assert_eq!(EyesConfig::new().with_max_fps(50).frame_interval_ms(), 20);
        assert_eq!(EyesConfig::new().with_max_fps(0).frame_interval_ms(), 1000);
    }

    #[test]
    fn test_timer_from_secs() {
        let timer = TimerConfig::from_secs(true, 3, 2);
        assert!(timer.enabled);
        assert_eq!(timer.interval_ms, 3000);
        assert_eq!(timer.variation_ms, 2000);
    }

    #[test]
    fn test_quiet_disables_behaviors() {
        let config = EyesConfig::quiet();
        assert!(!config.autoblink.enabled);
        assert!(!config.idle.enabled);
        assert_eq!(config.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_center() {
        let config = EyesConfig::new().with_screen(240, 320);
        assert_eq!(config.center(), (120, 160));
    }
}
