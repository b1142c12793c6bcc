//! Sweat drop simulation.
//!
//! Three drops run down the top edge of the screen, one in each band:
//!
//! ```text
//! |<- 30 ->|<------ width - 60 ------>|<- 30 ->|
//! | drop 0 |          drop 1          | drop 2 |
//! ```
//!
//! Each frame a drop falls half a pixel. It swells during the first half of
//! its travel and thins out during the second half, then respawns at a random
//! x inside its band with a fresh travel of 10-19 px.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use rand::RngCore;

use crate::behavior::random_below;
use crate::config::SWEAT_DROPS;

/// Width of the left and right spawn bands.
const EDGE_BAND: u32 = 30;

/// Fall speed in pixels per frame.
const FALL_STEP: f32 = 0.5;

/// Vertical start of a fresh drop.
const SPAWN_Y: f32 = 2.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SweatDrop {
    /// Horizontal center.
    pub x: i32,
    /// Top of the drop.
    pub y: f32,
    /// Travel limit; the drop respawns once `y` passes it.
    pub y_max: f32,
    pub width: f32,
    pub height: f32,
    /// Area covered by the last drawn frame of this drop.
    pub prev: Option<Rectangle>,
}

impl SweatDrop {
    /// A drop that respawns on its first step.
    const fn spent() -> Self {
        Self {
            x: 0,
            y: SPAWN_Y,
            y_max: 0.0,
            width: 1.0,
            height: 2.0,
            prev: None,
        }
    }

    /// Radius of the round body.
    pub fn radius(&self) -> u32 { ((self.width / 2.0) as u32).max(1) }

    /// Bottom of the drop, where the round body sits.
    pub fn body_center(&self) -> Point {
        let r = self.radius() as i32;
        let bottom = (self.y + self.height.max(0.0)) as i32;
        Point::new(self.x, (bottom - r).max(self.y as i32))
    }

    /// Top of the tapered tip.
    pub fn tip(&self) -> Point { Point::new(self.x, self.y as i32) }

    /// Box covering body and tip, with a one pixel margin for rasterization.
    pub fn bounds(&self) -> Rectangle {
        let r = self.radius() as i32;
        let center = self.body_center();
        let top = (self.y as i32).min(center.y - r);
        let top_left = Point::new(self.x - r - 1, top - 1);
        let bottom = center.y + r + 1;
        Rectangle::new(
            top_left,
            Size::new((2 * r + 3) as u32, (bottom - top_left.y + 1).max(1) as u32),
        )
    }
}

/// The three sweat drops.
#[derive(Clone, Debug)]
pub struct SweatDrops {
    drops: [SweatDrop; SWEAT_DROPS],
}

impl SweatDrops {
    pub const fn new() -> Self {
        Self {
            drops: [SweatDrop::spent(); SWEAT_DROPS],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SweatDrop> { self.drops.iter() }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SweatDrop> { self.drops.iter_mut() }

    /// Spawn band `[start, start + len)` of drop `index`.
    pub fn band(
        index: usize,
        screen_width: u32,
    ) -> (i32, u32) {
        match index {
            0 => (0, EDGE_BAND),
            1 => (EDGE_BAND as i32, screen_width.saturating_sub(2 * EDGE_BAND)),
            _ => (screen_width.saturating_sub(EDGE_BAND) as i32, EDGE_BAND),
        }
    }

    /// Advance every drop by one frame.
    pub fn step<R: RngCore>(
        &mut self,
        screen_width: u32,
        rng: &mut R,
    ) {
        for (index, drop) in self.drops.iter_mut().enumerate() {
            if drop.y <= drop.y_max {
                drop.y += FALL_STEP;
            } else {
                let (start, len) = Self::band(index, screen_width);
                drop.x = start + random_below(rng, len) as i32;
                drop.y = SPAWN_Y;
                drop.y_max = (random_below(rng, 10) + 10) as f32;
                drop.width = 1.0;
                drop.height = 2.0;
            }

            if drop.y <= drop.y_max / 2.0 {
                drop.width += 0.5;
                drop.height += 0.5;
            } else {
                drop.width = (drop.width - 0.1).max(1.0);
                drop.height = (drop.height - 0.5).max(1.0);
            }
        }
    }
}

impl Default for SweatDrops {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn test_first_step_respawns_in_band() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut drops = SweatDrops::new();
        drops.step(320, &mut rng);
        for (index, drop) in drops.iter().enumerate() {
            let (start, len) = SweatDrops::band(index, 320);
            assert!(drop.x >= start && drop.x < start + len as i32, "drop {index} at {}", drop.x);
            assert!(drop.y_max >= 10.0 && drop.y_max < 20.0);
            assert_eq!(drop.y, SPAWN_Y);
        }
    }

    #[test]
    fn test_bands_cover_screen() {
        assert_eq!(SweatDrops::band(0, 320), (0, 30));
        assert_eq!(SweatDrops::band(1, 320), (30, 260));
        assert_eq!(SweatDrops::band(2, 320), (290, 30));
    }

    #[test]
    fn test_drop_falls_grows_then_shrinks() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut drops = SweatDrops::new();
        drops.step(320, &mut rng);
        let start = drops.drops[0];

        // Falling stays under the travel limit for the whole first half.
        drops.step(320, &mut rng);
        let after = drops.drops[0];
        assert_eq!(after.y, start.y + FALL_STEP);
        assert!(after.height > start.height);

        let mut peak = after.height;
        let mut shrank = false;
        for _ in 0..60 {
            let before = drops.drops[0];
            drops.step(320, &mut rng);
            let now = drops.drops[0];
            if now.y < before.y {
                break;
            }
            if now.height < peak {
                shrank = true;
            }
            peak = peak.max(now.height);
        }
        assert!(shrank, "drop should thin out in the second half");
    }

    #[test]
    fn test_bounds_cover_shape() {
        let drop = SweatDrop {
            x: 50,
            y: 4.0,
            y_max: 15.0,
            width: 6.0,
            height: 8.0,
            prev: None,
        };
        let bounds = drop.bounds();
        let r = drop.radius() as i32;
        let center = drop.body_center();
        assert!(bounds.contains(drop.tip()));
        assert!(bounds.contains(center + Point::new(r, r)));
        assert!(bounds.contains(center - Point::new(r, 0)));
    }

    #[test]
    fn test_bounds_cover_body_of_thinning_drop() {
        // Late in the fall the height drops below the radius, so the body
        // pokes out above the tip.
        let drop = SweatDrop {
            x: 50,
            y: 12.0,
            y_max: 15.0,
            width: 9.0,
            height: 2.0,
            prev: None,
        };
        let r = drop.radius() as i32;
        let center = drop.body_center();
        assert!(center.y - r < drop.tip().y);

        let bounds = drop.bounds();
        assert!(bounds.contains(center - Point::new(0, r)));
        assert!(bounds.contains(center + Point::new(0, r)));
        assert!(bounds.contains(center - Point::new(r, 0)));
        assert!(bounds.contains(drop.tip()));
    }

    #[test]
    fn test_bounds_cover_every_frame_of_a_run() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut drops = SweatDrops::new();
        for _ in 0..300 {
            drops.step(320, &mut rng);
            for drop in drops.iter() {
                let bounds = drop.bounds();
                let r = drop.radius() as i32;
                let center = drop.body_center();
                for edge in [Point::new(0, -r), Point::new(0, r), Point::new(-r, 0), Point::new(r, 0)] {
                    assert!(bounds.contains(center + edge), "{drop:?}");
                }
                assert!(bounds.contains(drop.tip()));
            }
        }
    }

    #[test]
    fn test_narrow_screen_does_not_panic() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut drops = SweatDrops::new();
        for _ in 0..100 {
            drops.step(20, &mut rng);
        }
    }
}
