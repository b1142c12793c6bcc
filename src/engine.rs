//! Animation update engine.
//!
//! [`RoboEyes`] owns the eye geometry, every autonomous behavior and the
//! drawing surface. The caller polls [`RoboEyes::update`] from its main loop
//! with the current time; everything else happens inside that call.
//!
//! # Tick Order
//!
//! A call that passes the frame-rate gate runs, in order:
//!
//! 1. Behavior resolution: autoblink, idle gaze, gestures, shake keyframes
//! 2. Smoothing of every geometry value toward its target
//! 3. Flicker nudges on the current positions
//! 4. Blink override of the openness
//! 5. Sweat simulation step
//! 6. Render planner
//!
//! Calls that arrive earlier than one frame interval after the last rendered
//! frame return immediately without touching geometry or the surface.
//!
//! # Target Layering
//!
//! Targets are always recomputed from scratch by one function so independent
//! inputs never fight over a field:
//!
//! ```text
//! position  -> target centers (pair layout or cyclops center)
//! mood      -> target size + lid angles, scaled to the configured base size
//! curiosity -> target height override while looking East/West
//! open/close/blink -> target openness (never touched by the above)
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use rand::RngCore;

use crate::behavior::{
    Axis, BehaviorTimer, BlinkPhase, BlinkState, Flicker, Gesture, GestureEvent, ShakeSequence, random_below,
};
use crate::config::{
    BLINK_DURATION_MS, CONFUSED_AMPLITUDE, CURIOUS_HEIGHT, EyeDimensions, EyesConfig, GESTURE_DURATION_MS,
    LAUGH_AMPLITUDE, MOVE_RANGE, OPEN_SPEED, POSITION_SPEED, SHAPE_SPEED, TimerConfig,
};
use crate::error::EyesError;
use crate::expression::{Mood, Position};
use crate::geometry::{Eye, EyeSelect, EyeSide, Vec2};
use crate::profiling::{DebugLog, RenderStats};
use crate::render::{self, Frame, RenderState, Visibility};
use crate::surface::Surface;
use crate::sweat::SweatDrops;

/// Log through the `log` facade and into the on-device event log.
macro_rules! event {
    ($self:ident, $level:ident, $($arg:tt)*) => {{
        log::$level!($($arg)*);
        $self.log.push_fmt(format_args!($($arg)*));
    }};
}

/// Animated pair of eyes on a drawing surface.
///
/// `S` is the display, `R` the random source used for jitter, idle gaze and
/// sweat drops.
pub struct RoboEyes<S, R> {
    surface: S,
    rng: R,
    config: EyesConfig,
    eyes: [Eye; 2],

    /// Last observed clock in milliseconds.
    now: u64,
    /// Time of the last rendered frame, `None` until the first one.
    last_frame: Option<u64>,

    blink: BlinkState,
    autoblink: BehaviorTimer,
    idle: BehaviorTimer,
    confused: Gesture,
    laugh: Gesture,
    h_flicker: Flicker,
    v_flicker: Flicker,
    shake: ShakeSequence,
    sweat: SweatDrops,

    render_state: RenderState,
    stats: RenderStats,
    log: DebugLog,
}

impl<S, R> RoboEyes<S, R>
where
    S: Surface,
    R: RngCore,
{
    /// Create an engine with eyes settled at their configured targets.
    ///
    /// Fails when the surface has no drawable area or the configured screen
    /// has a zero dimension.
    pub fn new(
        surface: S,
        rng: R,
        config: EyesConfig,
    ) -> Result<Self, EyesError> {
        let size = surface.size();
        if size.width == 0 || size.height == 0 {
            return Err(EyesError::EmptySurface);
        }
        if config.screen_width == 0 || config.screen_height == 0 {
            return Err(EyesError::InvalidScreen {
                width: config.screen_width,
                height: config.screen_height,
            });
        }

        let eye = |dims: EyeDimensions| Eye::new(dims.width, dims.height, dims.border_radius, Vec2::default());
        let mut engine = Self {
            surface,
            rng,
            config,
            eyes: [eye(config.left), eye(config.right)],
            now: 0,
            last_frame: None,
            blink: BlinkState::Idle,
            autoblink: BehaviorTimer::new(config.autoblink.interval_ms, config.autoblink.variation_ms),
            idle: BehaviorTimer::new(config.idle.interval_ms, config.idle.variation_ms),
            confused: Gesture::new(Axis::Horizontal, CONFUSED_AMPLITUDE, GESTURE_DURATION_MS),
            laugh: Gesture::new(Axis::Vertical, LAUGH_AMPLITUDE, GESTURE_DURATION_MS),
            h_flicker: Flicker::default(),
            v_flicker: Flicker::default(),
            shake: ShakeSequence::new(),
            sweat: SweatDrops::new(),
            render_state: RenderState::new(),
            stats: RenderStats::new(),
            log: DebugLog::new(),
        };

        if engine.config.max_fps == 0 {
            engine.set_max_fps(0);
        }
        engine.retarget();
        for eye in &mut engine.eyes {
            eye.settle();
        }
        engine.arm_timers();
        Ok(engine)
    }

    /// Clear the screen and start the clock.
    ///
    /// Enabled timers are armed relative to `now` and the geometry snaps to
    /// its targets, so the first frame shows the configured face.
    pub fn begin(
        &mut self,
        now: u64,
    ) {
        self.now = now;
        self.last_frame = None;
        self.retarget();
        for eye in &mut self.eyes {
            eye.settle();
        }
        self.arm_timers();

        let frame = self.frame();
        render::full_clear(&mut self.surface, &frame, self.eyes.iter_mut(), &mut self.sweat);
        self.render_state.mark_cleared();
        event!(self, info, "begin {}x{} @{}fps", frame.screen.width, frame.screen.height, self.config.max_fps);
    }

    /// Advance the animation to `now` and draw it.
    ///
    /// Returns whether a frame was rendered; calls closer together than the
    /// frame interval are ignored.
    pub fn update(
        &mut self,
        now: u64,
    ) -> bool {
        self.now = now;
        let interval = u64::from(self.config.frame_interval_ms());
        if self.last_frame.is_some_and(|last| now.saturating_sub(last) < interval) {
            self.stats.frames_skipped += 1;
            return false;
        }

        self.resolve_behaviors(now);

        for eye in &mut self.eyes {
            eye.step(POSITION_SPEED, OPEN_SPEED, SHAPE_SPEED);
        }

        let dx = self.h_flicker.next_offset();
        let dy = self.v_flicker.next_offset();
        if dx != 0.0 || dy != 0.0 {
            for eye in &mut self.eyes {
                eye.position.x += dx;
                eye.position.y += dy;
            }
        }

        self.apply_blink(now);

        if self.config.sweat {
            self.sweat.step(self.config.screen_width, &mut self.rng);
        }

        self.render();
        self.last_frame = Some(now);
        self.stats.frames_rendered += 1;
        true
    }

    /// Draw the current geometry without advancing the animation.
    ///
    /// Eyes that have not changed since they were last drawn are skipped.
    pub fn draw_eyes(&mut self) { self.render(); }

    // =========================================================================
    // Expression
    // =========================================================================

    pub fn set_mood(
        &mut self,
        mood: Mood,
    ) {
        if mood != self.config.mood {
            event!(self, info, "mood {}", mood.label());
        }
        self.config.mood = mood;
        self.retarget();
    }

    pub fn set_position(
        &mut self,
        position: Position,
    ) {
        self.config.position = position;
        self.retarget();
    }

    /// Taller eyes while looking straight East or West.
    pub fn set_curiosity(
        &mut self,
        enabled: bool,
    ) {
        self.config.curiosity = enabled;
        self.retarget();
    }

    /// Show a single centered eye instead of a pair.
    pub fn set_cyclops(
        &mut self,
        enabled: bool,
    ) {
        if enabled != self.config.cyclops {
            event!(self, info, "cyclops {}", if enabled { "on" } else { "off" });
        }
        self.config.cyclops = enabled;
        self.retarget();
    }

    pub fn set_sweat(
        &mut self,
        enabled: bool,
    ) {
        self.config.sweat = enabled;
    }

    // =========================================================================
    // Lids
    // =========================================================================

    pub fn open(
        &mut self,
        which: EyeSelect,
    ) {
        self.set_target_open(which, 1.0);
    }

    pub fn close(
        &mut self,
        which: EyeSelect,
    ) {
        self.set_target_open(which, 0.0);
    }

    /// Start a blink unless one is already in flight.
    pub fn blink(
        &mut self,
        which: EyeSelect,
    ) {
        self.start_blink(which);
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Shake sideways for a moment.
    pub fn anim_confused(&mut self) {
        if self.confused.trigger() {
            event!(self, debug, "confused");
        }
    }

    /// Bounce up and down for a moment.
    pub fn anim_laugh(&mut self) {
        if self.laugh.trigger() {
            event!(self, debug, "laugh");
        }
    }

    /// Look back and forth three times, then return to center.
    ///
    /// Replaces a shake that is still running.
    pub fn anim_shake(
        &mut self,
        axis: Axis,
    ) {
        self.shake.start(axis, self.now);
        event!(self, debug, "shake {:?}", axis);
    }

    pub fn set_h_flicker(
        &mut self,
        enabled: bool,
        amplitude: u8,
    ) {
        self.h_flicker.set(enabled, amplitude);
    }

    pub fn set_v_flicker(
        &mut self,
        enabled: bool,
        amplitude: u8,
    ) {
        self.v_flicker.set(enabled, amplitude);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Blink every `interval + random(0..variation)` seconds.
    pub fn set_auto_blinker(
        &mut self,
        enabled: bool,
        interval_s: u16,
        variation_s: u16,
    ) {
        self.config.autoblink = TimerConfig::from_secs(enabled, interval_s, variation_s);
        let timer = self.config.autoblink;
        self.autoblink.configure(timer.enabled, timer.interval_ms, timer.variation_ms, self.now, &mut self.rng);
        event!(self, info, "autoblink {} {}s+{}s", enabled, interval_s, variation_s);
    }

    /// Look somewhere random every `interval + random(0..variation)` seconds.
    pub fn set_idle_mode(
        &mut self,
        enabled: bool,
        interval_s: u16,
        variation_s: u16,
    ) {
        self.config.idle = TimerConfig::from_secs(enabled, interval_s, variation_s);
        let timer = self.config.idle;
        self.idle.configure(timer.enabled, timer.interval_ms, timer.variation_ms, self.now, &mut self.rng);
        event!(self, info, "idle {} {}s+{}s", enabled, interval_s, variation_s);
    }

    /// Frame rate cap. Zero is raised to 1.
    pub fn set_max_fps(
        &mut self,
        fps: u8,
    ) {
        if fps == 0 {
            event!(self, warn, "max_fps 0 clamped to 1");
        }
        self.config.max_fps = fps.max(1);
    }

    /// Change both colors. The next frame starts from a full clear.
    pub fn set_colors(
        &mut self,
        background: Rgb565,
        foreground: Rgb565,
    ) {
        if background == self.config.background && foreground == self.config.foreground {
            return;
        }
        self.config.background = background;
        self.config.foreground = foreground;
        self.render_state.request_full_clear();
        event!(self, info, "colors changed");
    }

    /// Base widths; mood shapes scale from these.
    pub fn set_width(
        &mut self,
        left: u32,
        right: u32,
    ) {
        self.config.left.width = left;
        self.config.right.width = right;
        self.retarget();
    }

    pub fn set_height(
        &mut self,
        left: u32,
        right: u32,
    ) {
        self.config.left.height = left;
        self.config.right.height = right;
        self.retarget();
    }

    pub fn set_border_radius(
        &mut self,
        left: u32,
        right: u32,
    ) {
        self.config.left.border_radius = left;
        self.config.right.border_radius = right;
        self.retarget();
    }

    /// Horizontal gap between the eyes. Negative values overlap them.
    pub fn set_space_between(
        &mut self,
        space: i32,
    ) {
        self.config.space_between = space;
        self.retarget();
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    #[inline]
    pub const fn eye(
        &self,
        side: EyeSide,
    ) -> &Eye {
        &self.eyes[side.index()]
    }

    #[inline]
    pub const fn mood(&self) -> Mood { self.config.mood }

    #[inline]
    pub const fn position(&self) -> Position { self.config.position }

    #[inline]
    pub const fn is_blinking(&self) -> bool { self.blink.is_active() }

    /// Absolute time of the next auto blink, `None` while disabled.
    pub const fn auto_blink_next_fire(&self) -> Option<u64> { self.autoblink.next_fire() }

    /// Absolute time of the next idle gaze change, `None` while disabled.
    pub const fn idle_next_fire(&self) -> Option<u64> { self.idle.next_fire() }

    #[inline]
    pub const fn stats(&self) -> &RenderStats { &self.stats }

    #[inline]
    pub const fn log(&self) -> &DebugLog { &self.log }

    #[inline]
    pub const fn config(&self) -> &EyesConfig { &self.config }

    #[inline]
    pub const fn now(&self) -> u64 { self.now }

    #[inline]
    pub const fn surface(&self) -> &S { &self.surface }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }

    pub fn into_surface(self) -> S { self.surface }

    // =========================================================================
    // Internals
    // =========================================================================

    fn arm_timers(&mut self) {
        let (blink, idle) = (self.config.autoblink, self.config.idle);
        self.autoblink.configure(blink.enabled, blink.interval_ms, blink.variation_ms, self.now, &mut self.rng);
        self.idle.configure(idle.enabled, idle.interval_ms, idle.variation_ms, self.now, &mut self.rng);
    }

    fn resolve_behaviors(
        &mut self,
        now: u64,
    ) {
        if !self.blink.is_active() && self.autoblink.poll(now, BLINK_DURATION_MS, &mut self.rng) {
            event!(self, debug, "auto blink @{}", now);
            self.start_blink(EyeSelect::Both);
        }

        if self.idle.poll(now, 0, &mut self.rng) {
            let index = random_below(&mut self.rng, Position::ALL.len() as u32) as usize;
            let position = Position::ALL[index];
            event!(self, debug, "idle -> {}", position.label());
            self.stats.idle_moves += 1;
            self.set_position(position);
        }

        match self.confused.poll(now) {
            Some(GestureEvent::Start(amplitude)) => self.h_flicker.set(true, amplitude),
            Some(GestureEvent::Stop) => {
                self.h_flicker.set(false, 0);
                event!(self, debug, "confused done");
            }
            None => {}
        }
        match self.laugh.poll(now) {
            Some(GestureEvent::Start(amplitude)) => self.v_flicker.set(true, amplitude),
            Some(GestureEvent::Stop) => {
                self.v_flicker.set(false, 0);
                event!(self, debug, "laugh done");
            }
            None => {}
        }

        if let Some(position) = self.shake.poll(now) {
            self.set_position(position);
        }
    }

    fn start_blink(
        &mut self,
        which: EyeSelect,
    ) -> bool {
        if !self.blink.start(self.now, which) {
            return false;
        }
        self.set_target_open(which, 0.0);
        self.stats.blinks += 1;
        true
    }

    /// Force openness along the blink curve; finish the blink when due.
    fn apply_blink(
        &mut self,
        now: u64,
    ) {
        let BlinkState::Active { started, eyes } = self.blink else {
            return;
        };
        let phase = BlinkState::phase(started, now, BLINK_DURATION_MS);
        for side in EyeSide::BOTH {
            if !eyes.includes(side) {
                continue;
            }
            let eye = &mut self.eyes[side.index()];
            match phase {
                BlinkPhase::Closing(open) | BlinkPhase::Opening(open) => eye.open_amount = open,
                BlinkPhase::Done => {
                    eye.open_amount = 1.0;
                    eye.target_open = 1.0;
                }
            }
        }
        if phase == BlinkPhase::Done {
            self.blink = BlinkState::Idle;
        }
    }

    fn set_target_open(
        &mut self,
        which: EyeSelect,
        value: f32,
    ) {
        for side in EyeSide::BOTH {
            if which.includes(side) {
                self.eyes[side.index()].target_open = value;
            }
        }
    }

    /// Recompute every position and shape target from the configuration.
    fn retarget(&mut self) {
        let (cx, cy) = self.config.center();
        let (dx, dy) = self.config.position.offset(MOVE_RANGE);
        let half_gap = self.config.space_between / 2;

        let centers = if self.config.cyclops {
            [(cx + dx, cy + dy), (cx + dx, cy + dy)]
        } else {
            [
                (cx - half_gap - (self.config.left.width / 2) as i32 + dx, cy + dy),
                (cx + half_gap + (self.config.right.width / 2) as i32 + dx, cy + dy),
            ]
        };
        let curious = self.config.curiosity && self.config.position.is_lateral();

        for side in EyeSide::BOTH {
            let base = match side {
                EyeSide::Left => self.config.left,
                EyeSide::Right => self.config.right,
            };
            let shape = self.config.mood.shape_for(base);
            let (x, y) = centers[side.index()];
            let eye = &mut self.eyes[side.index()];
            eye.target_position = Vec2::new(x as f32, y as f32);
            eye.target_width = shape.width as f32;
            eye.target_height = if curious { CURIOUS_HEIGHT } else { shape.height } as f32;
            eye.target_border_radius = shape.border_radius as f32;
            eye.target_upper_lid_angle = shape.upper_lid_angle;
            eye.target_lower_lid_angle = shape.lower_lid_angle;
        }
    }

    /// Screen bounds shared by this frame's draw calls.
    fn frame(&self) -> Frame {
        let surface = self.surface.size();
        Frame {
            screen: Size::new(
                self.config.screen_width.min(surface.width),
                self.config.screen_height.min(surface.height),
            ),
            background: self.config.background,
            foreground: self.config.foreground,
        }
    }

    fn render(&mut self) {
        let frame = self.frame();
        if self.render_state.need_full_clear() {
            render::full_clear(&mut self.surface, &frame, self.eyes.iter_mut(), &mut self.sweat);
            self.render_state.mark_cleared();
        }

        let visibility = self.visibility();
        render::render_frame(
            &mut self.surface,
            &frame,
            &mut self.eyes,
            &mut self.sweat,
            visibility,
            &mut self.stats,
        );
    }

    /// In cyclops mode only the left eye is shown.
    const fn visibility(&self) -> Visibility {
        Visibility {
            eyes: [true, !self.config.cyclops],
            sweat: self.config.sweat,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
