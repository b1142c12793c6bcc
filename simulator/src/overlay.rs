//! Debug overlay in the bottom strip of the window.
//!
//! The strip sits below the lowest point an eye (plus its clear margin) can
//! reach, so the engine's dirty regions never touch it.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::{String, Vec};
use profont::PROFONT_9_POINT;
use rand::RngCore;
use roboeyes::colors::{AMBER, GRAY, WHITE};
use roboeyes::{RoboEyes, Surface};

use crate::profiling::FrameMetrics;

/// Top of the overlay strip.
pub const OVERLAY_Y: i32 = 192;
const LINE_HEIGHT: i32 = 11;
const TEXT_X: i32 = 4;
const LOG_TAIL: usize = 2;

pub const LINE_LENGTH: usize = 52;
pub const LINES: usize = 2 + LOG_TAIL;

pub type Lines = Vec<(String<LINE_LENGTH>, Rgb565), LINES>;

/// Overlay text for the current engine state.
pub fn lines<S: Surface, R: RngCore>(
    eyes: &RoboEyes<S, R>,
    metrics: &FrameMetrics,
) -> Lines {
    let mut lines = Lines::new();
    let stats = eyes.stats();
    let now = eyes.now();
    let until = |at: Option<u64>| at.map_or(-1.0, |at| at.saturating_sub(now) as f32 / 1000.0);

    let mut status: String<LINE_LENGTH> = String::new();
    let _ = write!(
        status,
        "{} {} blink {:.1}s idle {:.1}s",
        eyes.mood().label(),
        eyes.position().label(),
        until(eyes.auto_blink_next_fire()),
        until(eyes.idle_next_fire()),
    );
    lines.push((status, WHITE)).ok();

    let mut perf: String<LINE_LENGTH> = String::new();
    let _ = write!(
        perf,
        "render {}%  clear {}px/f  {}us/f",
        stats.render_ratio_pct(),
        stats.pixels_cleared / u64::from(stats.frames_rendered.max(1)),
        metrics.frame_time_avg_us(),
    );
    lines.push((perf, GRAY)).ok();

    let skip = eyes.log().len().saturating_sub(LOG_TAIL);
    for entry in eyes.log().iter().skip(skip) {
        let mut line: String<LINE_LENGTH> = String::new();
        let _ = write!(line, "> {entry}");
        lines.push((line, AMBER)).ok();
    }
    lines
}

/// Clear the strip and draw `lines` into it.
pub fn draw<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    lines: &Lines,
    background: Rgb565,
) {
    clear(display, background);
    for (index, (text, color)) in lines.iter().enumerate() {
        let y = OVERLAY_Y + LINE_HEIGHT * (index as i32 + 1) - 2;
        Text::new(text, Point::new(TEXT_X, y), MonoTextStyle::new(&PROFONT_9_POINT, *color))
            .draw(display)
            .ok();
    }
}

pub fn clear<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    background: Rgb565,
) {
    let size = display.bounding_box().size;
    let strip = Rectangle::new(
        Point::new(0, OVERLAY_Y),
        Size::new(size.width, size.height.saturating_sub(OVERLAY_Y as u32)),
    );
    display.fill_solid(&strip, background).ok();
}
