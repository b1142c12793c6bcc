//! Eye geometry model.
//!
//! Pure state: every animated scalar of an eye has a current value and a
//! target value. The engine moves current values toward targets with
//! [`approach`] once per rendered frame; callers only ever write targets.
//!
//! | Field | Written by |
//! |-------|-----------|
//! | `target_*` | Engine API (mood, position, open/close/blink) |
//! | current values | Engine smoothing step (and blink/flicker overrides) |
//! | `prev` | Render planner, after drawing |
//!
//! The previous snapshot is what was actually put on screen last frame; the
//! render planner diffs it against the current geometry to find the smallest
//! region that needs clearing.

/// Screen-space point with sub-pixel precision.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }
}

/// Which physical eye.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EyeSide {
    Left,
    Right,
}

impl EyeSide {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Index into the engine's eye array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Eye selection for open/close/blink.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum EyeSelect {
    Left,
    Right,
    #[default]
    Both,
}

impl EyeSelect {
    /// Build from per-eye flags. `(false, false)` selects nothing and is
    /// reported as `None`.
    pub const fn from_flags(
        left: bool,
        right: bool,
    ) -> Option<Self> {
        match (left, right) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Left),
            (false, true) => Some(Self::Right),
            (false, false) => None,
        }
    }

    #[inline]
    pub const fn includes(
        self,
        side: EyeSide,
    ) -> bool {
        matches!(
            (self, side),
            (Self::Both, _) | (Self::Left, EyeSide::Left) | (Self::Right, EyeSide::Right)
        )
    }
}

/// What an eye looked like when it was last drawn.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EyeSnapshot {
    pub position: Vec2,
    pub open_amount: f32,
    pub width: f32,
    pub height: f32,
    pub border_radius: f32,
    pub upper_lid_angle: f32,
    pub lower_lid_angle: f32,
}

/// One animated eye.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Eye {
    pub width: f32,
    pub height: f32,
    pub border_radius: f32,
    pub target_width: f32,
    pub target_height: f32,
    pub target_border_radius: f32,

    /// Current center.
    pub position: Vec2,
    pub target_position: Vec2,

    /// 0.0 = closed, 1.0 = fully open.
    pub open_amount: f32,
    pub target_open: f32,

    pub upper_lid_angle: f32,
    pub lower_lid_angle: f32,
    pub target_upper_lid_angle: f32,
    pub target_lower_lid_angle: f32,

    /// Last rendered state, `None` until first drawn (or after being erased).
    pub prev: Option<EyeSnapshot>,
}

impl Eye {
    /// A fully open, settled eye of the given size centered at `position`.
    pub fn new(
        width: u32,
        height: u32,
        border_radius: u32,
        position: Vec2,
    ) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            border_radius: border_radius as f32,
            target_width: width as f32,
            target_height: height as f32,
            target_border_radius: border_radius as f32,
            position,
            target_position: position,
            open_amount: 1.0,
            target_open: 1.0,
            upper_lid_angle: 0.0,
            lower_lid_angle: 0.0,
            target_upper_lid_angle: 0.0,
            target_lower_lid_angle: 0.0,
            prev: None,
        }
    }

    /// Current state as a snapshot (what would be drawn right now).
    pub const fn snapshot(&self) -> EyeSnapshot {
        EyeSnapshot {
            position: self.position,
            open_amount: self.open_amount,
            width: self.width,
            height: self.height,
            border_radius: self.border_radius,
            upper_lid_angle: self.upper_lid_angle,
            lower_lid_angle: self.lower_lid_angle,
        }
    }

    /// Last rendered center, if drawn.
    #[inline]
    pub fn prev_position(&self) -> Option<Vec2> { self.prev.map(|p| p.position) }

    /// Last rendered openness, if drawn.
    #[inline]
    pub fn prev_open_amount(&self) -> Option<f32> { self.prev.map(|p| p.open_amount) }

    /// Move every current value one smoothing step toward its target.
    pub fn step(
        &mut self,
        position_speed: f32,
        open_speed: f32,
        shape_speed: f32,
    ) {
        self.position.x = approach(self.position.x, self.target_position.x, position_speed);
        self.position.y = approach(self.position.y, self.target_position.y, position_speed);
        self.open_amount = approach(self.open_amount, self.target_open, open_speed);
        self.width = approach(self.width, self.target_width, shape_speed);
        self.height = approach(self.height, self.target_height, shape_speed);
        self.border_radius = approach(self.border_radius, self.target_border_radius, shape_speed);
        self.upper_lid_angle = approach(self.upper_lid_angle, self.target_upper_lid_angle, shape_speed);
        self.lower_lid_angle = approach(self.lower_lid_angle, self.target_lower_lid_angle, shape_speed);
    }

    /// Jump every current value to its target.
    pub fn settle(&mut self) {
        self.position = self.target_position;
        self.open_amount = self.target_open;
        self.width = self.target_width;
        self.height = self.target_height;
        self.border_radius = self.target_border_radius;
        self.upper_lid_angle = self.target_upper_lid_angle;
        self.lower_lid_angle = self.target_lower_lid_angle;
    }

    /// Whether every current value is within `epsilon` of its target.
    pub fn is_settled(
        &self,
        epsilon: f32,
    ) -> bool {
        let close = |a: f32, b: f32| {
            let d = a - b;
            d < epsilon && -d < epsilon
        };
        close(self.position.x, self.target_position.x)
            && close(self.position.y, self.target_position.y)
            && close(self.open_amount, self.target_open)
            && close(self.width, self.target_width)
            && close(self.height, self.target_height)
            && close(self.border_radius, self.target_border_radius)
            && close(self.upper_lid_angle, self.target_upper_lid_angle)
            && close(self.lower_lid_angle, self.target_lower_lid_angle)
    }

    /// Height of the visible shape (`height * open_amount`).
    #[inline]
    pub fn visible_height(&self) -> f32 { self.height * self.open_amount }
}

/// First-order exponential approach: move `rate` of the remaining distance.
///
/// For `rate` in `(0, 1]` the result never overshoots `target`.
#[inline]
pub fn approach(
    current: f32,
    target: f32,
    rate: f32,
) -> f32 {
    current + (target - current) * rate
}
