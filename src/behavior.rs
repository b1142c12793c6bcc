//! Autonomous behavior state machines.
//!
//! Every behavior that writes into the eye geometry on its own is modeled as a
//! small explicit state machine, polled once per rendered frame:
//!
//! - [`BehaviorTimer`]: jittered periodic trigger (autoblink, idle gaze).
//!   `Armed { next_fire }` -> fires -> `Cooldown { until, next_fire }` -> `Armed`.
//! - [`BlinkState`]: at most one blink in flight. `Idle` -> `Active` -> `Idle`.
//! - [`Gesture`]: one-shot flicker gesture (confused, laugh), armed externally
//!   and disarmed by its own timeout. `Idle` -> `Armed` -> `Active` -> `Idle`.
//! - [`Flicker`]: alternating +/- offset applied every frame while enabled.
//! - [`ShakeSequence`]: queue of timed gaze keyframes, so head shakes never
//!   block the caller.
//!
//! # Jitter
//!
//! A timer fires at `now + interval + random(0..variation)`, re-rolled each
//! time it fires. Autoblink also pads the next deadline with the blink
//! duration so a blink that just finished can never be re-triggered by
//! timing slop.

use heapless::Deque;
use rand::{Rng, RngCore};

use crate::config::{SHAKE_STEP_MS, SHAKE_SWINGS};
use crate::expression::Position;
use crate::geometry::EyeSelect;

/// Uniform random integer in `0..bound`; a zero bound yields 0.
pub fn random_below<R: RngCore>(
    rng: &mut R,
    bound: u32,
) -> u32 {
    if bound == 0 { 0 } else { rng.gen_range(0..bound) }
}

// =============================================================================
// Periodic Timer
// =============================================================================

/// Timer state. Only meaningful while the timer is enabled.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    /// Waiting for the clock to pass `next_fire`.
    Armed { next_fire: u64 },
    /// Just fired; ignores the clock until `until`, then re-arms.
    Cooldown { until: u64, next_fire: u64 },
}

/// Jittered periodic trigger.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BehaviorTimer {
    enabled: bool,
    interval_ms: u32,
    variation_ms: u32,
    state: TimerState,
}

impl BehaviorTimer {
    /// A disabled timer with the given period.
    pub const fn new(
        interval_ms: u32,
        variation_ms: u32,
    ) -> Self {
        Self {
            enabled: false,
            interval_ms,
            variation_ms,
            state: TimerState::Armed { next_fire: 0 },
        }
    }

    #[inline]
    pub const fn state(&self) -> TimerState { self.state }

    /// Absolute time of the next trigger, `None` while disabled.
    pub const fn next_fire(&self) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        match self.state {
            TimerState::Armed { next_fire } | TimerState::Cooldown { next_fire, .. } => Some(next_fire),
        }
    }

    /// Change period and enable flag. Enabling (re)arms from `now`.
    pub fn configure<R: RngCore>(
        &mut self,
        enabled: bool,
        interval_ms: u32,
        variation_ms: u32,
        now: u64,
        rng: &mut R,
    ) {
        self.interval_ms = interval_ms;
        self.variation_ms = variation_ms;
        self.enabled = enabled;
        if enabled {
            self.arm(now, rng);
        }
    }

    /// Schedule the next trigger relative to `now`.
    pub fn arm<R: RngCore>(
        &mut self,
        now: u64,
        rng: &mut R,
    ) {
        self.state = TimerState::Armed {
            next_fire: self.deadline_from(now, 0, rng),
        };
    }

    /// Advance the timer. Returns `true` exactly once per period, when `now`
    /// has passed the deadline.
    ///
    /// `refractory_ms` is added to the next deadline and kept as a cooldown
    /// window during which the timer cannot fire.
    pub fn poll<R: RngCore>(
        &mut self,
        now: u64,
        refractory_ms: u32,
        rng: &mut R,
    ) -> bool {
        if !self.enabled {
            return false;
        }

        if let TimerState::Cooldown { until, next_fire } = self.state {
            if now < until {
                return false;
            }
            self.state = TimerState::Armed { next_fire };
        }

        let TimerState::Armed { next_fire } = self.state else {
            return false;
        };
        if now <= next_fire {
            return false;
        }

        let next_fire = self.deadline_from(now, refractory_ms, rng);
        self.state = if refractory_ms > 0 {
            TimerState::Cooldown {
                until: now + u64::from(refractory_ms),
                next_fire,
            }
        } else {
            TimerState::Armed { next_fire }
        };
        true
    }

    fn deadline_from<R: RngCore>(
        &self,
        now: u64,
        padding_ms: u32,
        rng: &mut R,
    ) -> u64 {
        now + u64::from(padding_ms) + u64::from(self.interval_ms) + u64::from(random_below(rng, self.variation_ms))
    }
}

// =============================================================================
// Blink
// =============================================================================

/// Blink state machine. At most one blink is in flight.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum BlinkState {
    #[default]
    Idle,
    Active { started: u64, eyes: EyeSelect },
}

/// Where a blink is at a given time.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BlinkPhase {
    /// Openness forced to this value.
    Closing(f32),
    Opening(f32),
    /// The blink is over.
    Done,
}

impl BlinkState {
    #[inline]
    pub const fn is_active(&self) -> bool { matches!(self, Self::Active { .. }) }

    /// Start a blink. Returns `false` (and changes nothing) if one is already
    /// in flight.
    pub fn start(
        &mut self,
        now: u64,
        eyes: EyeSelect,
    ) -> bool {
        if self.is_active() {
            return false;
        }
        *self = Self::Active { started: now, eyes };
        true
    }

    /// Two-phase linear curve: the first half closes, the second half opens.
    pub fn phase(
        started: u64,
        now: u64,
        duration_ms: u32,
    ) -> BlinkPhase {
        let elapsed = now.saturating_sub(started);
        let half = u64::from(duration_ms / 2).max(1);
        if elapsed < half {
            BlinkPhase::Closing(1.0 - elapsed as f32 / half as f32)
        } else if elapsed < u64::from(duration_ms) {
            BlinkPhase::Opening((elapsed - half) as f32 / half as f32)
        } else {
            BlinkPhase::Done
        }
    }
}

// =============================================================================
// Flicker
// =============================================================================

/// Alternating offset: `+amplitude` on one frame, `-amplitude` on the next.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Flicker {
    pub enabled: bool,
    pub amplitude: u8,
    alternate: bool,
}

impl Flicker {
    pub fn set(
        &mut self,
        enabled: bool,
        amplitude: u8,
    ) {
        self.enabled = enabled;
        self.amplitude = amplitude;
    }

    /// Offset for this frame, flipping the sign for the next one.
    pub fn next_offset(&mut self) -> f32 {
        if !self.enabled || self.amplitude == 0 {
            return 0.0;
        }
        let amplitude = f32::from(self.amplitude);
        self.alternate = !self.alternate;
        if self.alternate { amplitude } else { -amplitude }
    }
}

// =============================================================================
// One-shot Gestures
// =============================================================================

/// Flicker axis of a gesture.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum GestureState {
    #[default]
    Idle,
    /// Requested; starts on the next frame.
    Armed,
    Active { started: u64 },
}

/// What the engine must do after polling a gesture.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GestureEvent {
    /// Turn the flicker on with this amplitude.
    Start(u8),
    /// Turn the flicker off.
    Stop,
}

/// Timed flicker gesture ("confused" shakes sideways, "laugh" bounces).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Gesture {
    pub axis: Axis,
    pub amplitude: u8,
    pub duration_ms: u32,
    state: GestureState,
}

impl Gesture {
    pub const fn new(
        axis: Axis,
        amplitude: u8,
        duration_ms: u32,
    ) -> Self {
        Self {
            axis,
            amplitude,
            duration_ms,
            state: GestureState::Idle,
        }
    }

    #[inline]
    pub const fn state(&self) -> GestureState { self.state }

    #[inline]
    pub const fn is_idle(&self) -> bool { matches!(self.state, GestureState::Idle) }

    /// Request the gesture. Ignored unless idle.
    pub fn trigger(&mut self) -> bool {
        if self.is_idle() {
            self.state = GestureState::Armed;
            true
        } else {
            false
        }
    }

    pub fn poll(
        &mut self,
        now: u64,
    ) -> Option<GestureEvent> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Armed => {
                self.state = GestureState::Active { started: now };
                Some(GestureEvent::Start(self.amplitude))
            }
            GestureState::Active { started } if now >= started + u64::from(self.duration_ms) => {
                self.state = GestureState::Idle;
                Some(GestureEvent::Stop)
            }
            GestureState::Active { .. } => None,
        }
    }
}

// =============================================================================
// Head Shake Keyframes
// =============================================================================

/// Capacity of the keyframe queue: two keyframes per swing plus the return
/// to center.
pub const SHAKE_KEYFRAMES: usize = SHAKE_SWINGS * 2 + 1;

/// A gaze target to apply once the clock reaches `due`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Keyframe {
    pub due: u64,
    pub position: Position,
}

/// Timed sequence of gaze targets.
pub struct ShakeSequence {
    frames: Deque<Keyframe, SHAKE_KEYFRAMES>,
}

impl ShakeSequence {
    pub const fn new() -> Self { Self { frames: Deque::new() } }

    #[inline]
    pub fn is_empty(&self) -> bool { self.frames.is_empty() }

    #[inline]
    pub fn len(&self) -> usize { self.frames.len() }

    /// Replace any pending sequence with a shake along `axis` starting at
    /// `now`, ending back at center.
    pub fn start(
        &mut self,
        axis: Axis,
        now: u64,
    ) {
        let (a, b) = match axis {
            Axis::Horizontal => (Position::East, Position::West),
            Axis::Vertical => (Position::North, Position::South),
        };
        self.frames.clear();
        let step = u64::from(SHAKE_STEP_MS);
        let mut due = now;
        for _ in 0..SHAKE_SWINGS {
            self.frames.push_back(Keyframe { due, position: a }).ok();
            due += step;
            self.frames.push_back(Keyframe { due, position: b }).ok();
            due += step;
        }
        self.frames
            .push_back(Keyframe {
                due,
                position: Position::Default,
            })
            .ok();
    }

    /// Pop every keyframe that is due and return the latest one.
    pub fn poll(
        &mut self,
        now: u64,
    ) -> Option<Position> {
        let mut latest = None;
        while let Some(frame) = self.frames.front() {
            if frame.due > now {
                break;
            }
            latest = Some(frame.position);
            self.frames.pop_front();
        }
        latest
    }
}

impl Default for ShakeSequence {
    fn default() -> Self { Self::new() }
}
