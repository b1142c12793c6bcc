//! RoboEyes simulator for Windows/Desktop.
//!
//! Runs the animation engine on an `embedded-graphics-simulator` window at the
//! engine's frame rate. See [`controls`] for the keyboard bindings.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod controls;
mod logger;
mod overlay;
mod profiling;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use roboeyes::config::{AUTOBLINK_INTERVAL_S, AUTOBLINK_VARIATION_S, IDLE_INTERVAL_S, IDLE_VARIATION_S};
use roboeyes::{EyeSelect, EyesConfig, GraphicsSurface, RoboEyes};

use crate::controls::{Command, command_for};
use crate::profiling::FrameMetrics;
use crate::timing::{FRAME_TIME, OVERLAY_REFRESH};

type Eyes = RoboEyes<GraphicsSurface<SimulatorDisplay<Rgb565>>, SmallRng>;

fn main() {
    logger::init("debug");

    let config = EyesConfig::default();
    let display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(config.screen_width, config.screen_height));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("RoboEyes Sim", &output_settings);

    let mut eyes = match RoboEyes::new(GraphicsSurface::new(display), SmallRng::from_entropy(), config) {
        Ok(eyes) => eyes,
        Err(e) => {
            log::error!("cannot start: {e}");
            return;
        }
    };

    let mut metrics = FrameMetrics::new();
    eyes.begin(metrics.uptime_ms());

    let mut show_overlay = false;
    let mut overlay_dirty = false;
    let mut last_overlay = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    let Some(command) = command_for(&keycode.name()) else {
                        continue;
                    };
                    if command == Command::ToggleOverlay {
                        show_overlay = !show_overlay;
                        overlay_dirty = true;
                    } else {
                        apply(&mut eyes, command);
                    }
                }
                _ => {}
            }
        }

        eyes.update(metrics.uptime_ms());

        let background = eyes.config().background;
        if show_overlay && (overlay_dirty || last_overlay.elapsed() >= OVERLAY_REFRESH) {
            let lines = overlay::lines(&eyes, &metrics);
            overlay::draw(eyes.surface_mut().inner_mut(), &lines, background);
            last_overlay = Instant::now();
            overlay_dirty = false;
        } else if !show_overlay && overlay_dirty {
            overlay::clear(eyes.surface_mut().inner_mut(), background);
            overlay_dirty = false;
        }

        let update_time = frame_start.elapsed();
        window.update(eyes.surface().inner());

        let pre_sleep = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(pre_sleep) {
            thread::sleep(remaining);
        }
        let sleep_time = frame_start.elapsed().saturating_sub(pre_sleep);

        metrics.record_frame(frame_start.elapsed(), update_time, sleep_time);
    }
}

/// Forward a key command to the engine.
fn apply(
    eyes: &mut Eyes,
    command: Command,
) {
    let config = *eyes.config();
    match command {
        Command::Mood(mood) => eyes.set_mood(mood),
        Command::Look(position) => eyes.set_position(position),
        Command::Blink => eyes.blink(EyeSelect::Both),
        Command::Open => eyes.open(EyeSelect::Both),
        Command::Close => eyes.close(EyeSelect::Both),
        Command::Confused => eyes.anim_confused(),
        Command::Laugh => eyes.anim_laugh(),
        Command::Shake(axis) => eyes.anim_shake(axis),
        Command::ToggleCyclops => eyes.set_cyclops(!config.cyclops),
        Command::ToggleCuriosity => {
            eyes.set_curiosity(!config.curiosity);
            log::info!("curiosity {}", !config.curiosity);
        }
        Command::ToggleSweat => {
            eyes.set_sweat(!config.sweat);
            log::info!("sweat {}", !config.sweat);
        }
        Command::ToggleAutoBlink => {
            eyes.set_auto_blinker(!config.autoblink.enabled, AUTOBLINK_INTERVAL_S, AUTOBLINK_VARIATION_S);
        }
        Command::ToggleIdle => eyes.set_idle_mode(!config.idle.enabled, IDLE_INTERVAL_S, IDLE_VARIATION_S),
        Command::ToggleOverlay => {}
    }
}
