//! Mood presets and gaze positions.
//!
//! # Moods
//!
//! A [`Mood`] maps to a [`MoodShape`]: target lid angles and nominal eye
//! dimensions. The table is expressed for the default 40x50 eye with a 15px
//! radius and scaled to the configured eye size, so custom eye sizes keep the
//! same proportions:
//!
//! | Mood    | upper | lower | w  | h  | r  |
//! |---------|-------|-------|----|----|----|
//! | Default |  0.00 |  0.00 | 40 | 50 | 15 |
//! | Happy   | -0.28 |  0.28 | 40 | 36 | 12 |
//! | Sad     |  0.32 | -0.28 | 40 | 38 | 10 |
//! | Angry   | -0.48 | -0.18 | 38 | 34 |  8 |
//! | Tired   |  0.08 | -0.10 | 40 | 20 |  6 |
//!
//! Lid angles are slopes: a lid line is offset by `angle * width / 2` at each
//! corner, in opposite directions.
//!
//! # Positions
//!
//! Nine symbolic gaze directions: center plus the eight compass points. Each
//! maps to a unit offset that the engine multiplies by
//! [`MOVE_RANGE`](crate::config::MOVE_RANGE).

use crate::config::{EYE_BORDER_RADIUS, EYE_HEIGHT, EYE_WIDTH, EyeDimensions};

// =============================================================================
// Mood
// =============================================================================

/// Expression preset.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Mood {
    #[default]
    Default,
    Happy,
    Sad,
    Angry,
    Tired,
}

/// Target lid angles and nominal size for one mood.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MoodShape {
    pub upper_lid_angle: f32,
    pub lower_lid_angle: f32,
    pub width: u32,
    pub height: u32,
    pub border_radius: u32,
}

impl Mood {
    /// All moods in table order.
    pub const ALL: [Self; 5] = [Self::Default, Self::Happy, Self::Sad, Self::Angry, Self::Tired];

    /// Mood from a numeric code. Unknown codes fall back to [`Mood::Default`].
    pub const fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Happy,
            2 => Self::Sad,
            3 => Self::Angry,
            4 => Self::Tired,
            _ => Self::Default,
        }
    }

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Happy => "HAPPY",
            Self::Sad => "SAD",
            Self::Angry => "ANGRY",
            Self::Tired => "TIRED",
        }
    }

    /// Shape for the default 40x50 r15 eye.
    pub const fn shape(self) -> MoodShape {
        match self {
            Self::Default => MoodShape {
                upper_lid_angle: 0.0,
                lower_lid_angle: 0.0,
                width: 40,
                height: 50,
                border_radius: 15,
            },
            Self::Happy => MoodShape {
                upper_lid_angle: -0.28,
                lower_lid_angle: 0.28,
                width: 40,
                height: 36,
                border_radius: 12,
            },
            Self::Sad => MoodShape {
                upper_lid_angle: 0.32,
                lower_lid_angle: -0.28,
                width: 40,
                height: 38,
                border_radius: 10,
            },
            Self::Angry => MoodShape {
                upper_lid_angle: -0.48,
                lower_lid_angle: -0.18,
                width: 38,
                height: 34,
                border_radius: 8,
            },
            Self::Tired => MoodShape {
                upper_lid_angle: 0.08,
                lower_lid_angle: -0.1,
                width: 40,
                height: 20,
                border_radius: 6,
            },
        }
    }

    /// Shape scaled to an eye whose neutral size is `base`.
    ///
    /// With the default base this returns [`Mood::shape`] unchanged.
    pub fn shape_for(
        self,
        base: EyeDimensions,
    ) -> MoodShape {
        let shape = self.shape();
        MoodShape {
            width: scale(shape.width, base.width, EYE_WIDTH),
            height: scale(shape.height, base.height, EYE_HEIGHT),
            border_radius: scale(shape.border_radius, base.border_radius, EYE_BORDER_RADIUS),
            ..shape
        }
    }
}

/// `value * base / reference`, rounded to the nearest pixel.
fn scale(
    value: u32,
    base: u32,
    reference: u32,
) -> u32 {
    (value * base + reference / 2) / reference
}

// =============================================================================
// Position
// =============================================================================

/// Gaze direction.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Position {
    /// Center.
    #[default]
    Default,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Position {
    /// All positions, center first. Idle mode picks uniformly from this list.
    pub const ALL: [Self; 9] = [
        Self::Default,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Position from a numeric code. Unknown codes fall back to center.
    pub const fn from_index(index: u8) -> Self {
        if (index as usize) < Self::ALL.len() {
            Self::ALL[index as usize]
        } else {
            Self::Default
        }
    }

    /// Unit offset `(dx, dy)`; screen y grows downward.
    pub const fn unit_offset(self) -> (i32, i32) {
        match self {
            Self::Default => (0, 0),
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Offset in pixels for a given move range.
    #[inline]
    pub const fn offset(
        self,
        range: i32,
    ) -> (i32, i32) {
        let (dx, dy) = self.unit_offset();
        (dx * range, dy * range)
    }

    /// Looking straight left or right (the curiosity trigger).
    #[inline]
    pub const fn is_lateral(self) -> bool { matches!(self, Self::East | Self::West) }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "CENTER",
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }
}
