//! Render planner.
//!
//! Turns eye geometry into draw calls while touching as few pixels as
//! possible. Nothing here mutates geometry except the `prev` snapshot of each
//! eye, which records what was actually drawn.
//!
//! # Dirty Regions
//!
//! For every eye the planner computes the box of the current shape and the box
//! of the previously drawn shape:
//!
//! ```text
//! x: center +/- width/2, inflated by radius + 6
//! y: center +/- max(height * open, 2)/2, inflated by max(radius, lid overhang) + 6
//! ```
//!
//! Their union, clamped to the screen, is cleared to the background color.
//! The inflation covers rounded corners and lid lines that stick out of the
//! nominal box.
//!
//! A frame runs in two passes. Every dirty region is cleared first, then every
//! element that changed or overlaps any cleared region is drawn. Boxes of
//! neighboring eyes and sweat drops may overlap, so drawing right after each
//! clear would let a later clear cut into an earlier drawing.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Whole screen | `begin`, background color change | Full clear, all eyes redrawn |
//! | Eye | Snapshot changed | Clear union box, redraw |
//! | Eye | Unchanged but overlapped by a cleared region | Redraw |
//! | Hidden eye (cyclops) | Once | Clear last drawn box |
//! | Sweat drop | Every frame while enabled | Clear union box, redraw |

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use micromath::F32;

use crate::config::{LID_THRESHOLD, RENDER_PADDING, SWEAT_DROPS, VISIBILITY_FLOOR};
use crate::geometry::{Eye, EyeSnapshot};
use crate::profiling::RenderStats;
use crate::surface::Surface;
use crate::sweat::{SweatDrop, SweatDrops};

/// Eyes in a pair.
pub const EYES: usize = 2;

/// Upper bound on regions cleared in one frame: one per eye and per drop.
const MAX_CLEARS: usize = EYES + SWEAT_DROPS;

// =============================================================================
// Bounding Boxes
// =============================================================================

/// Axis-aligned box in signed screen coordinates; `right` and `bottom` are
/// exclusive. May extend past the screen until clamped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Box covering everything drawn for `eye`, padding included.
    pub fn of_eye(eye: &EyeSnapshot) -> Self {
        let visible = (eye.height * eye.open_amount).max(VISIBILITY_FLOOR as f32);
        let radius = eye.border_radius.max(0.0);
        let slope = F32(eye.upper_lid_angle).abs().0.max(F32(eye.lower_lid_angle).abs().0);
        let overhang = slope * eye.width.max(0.0) / 2.0;
        let half_w = eye.width.max(0.0) / 2.0 + radius + RENDER_PADDING as f32;
        let half_h = visible / 2.0 + radius.max(overhang) + RENDER_PADDING as f32;
        Self {
            left: floor(eye.position.x - half_w),
            top: floor(eye.position.y - half_h),
            right: ceil(eye.position.x + half_w),
            bottom: ceil(eye.position.y + half_h),
        }
    }

    pub fn of_rect(rect: &Rectangle) -> Self {
        Self {
            left: rect.top_left.x,
            top: rect.top_left.y,
            right: rect.top_left.x + rect.size.width as i32,
            bottom: rect.top_left.y + rect.size.height as i32,
        }
    }

    pub fn union(
        self,
        other: Self,
    ) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub const fn contains(
        &self,
        other: &Self,
    ) -> bool {
        self.left <= other.left && self.top <= other.top && self.right >= other.right && self.bottom >= other.bottom
    }

    pub const fn intersects(
        &self,
        other: &Self,
    ) -> bool {
        self.left < other.right && other.left < self.right && self.top < other.bottom && other.top < self.bottom
    }

    /// Intersection with `[0, width) x [0, height)`; `None` when empty.
    pub fn clamp(
        self,
        screen: Size,
    ) -> Option<Rectangle> {
        let left = self.left.max(0);
        let top = self.top.max(0);
        let right = self.right.min(screen.width as i32);
        let bottom = self.bottom.min(screen.height as i32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rectangle::new(
            Point::new(left, top),
            Size::new((right - left) as u32, (bottom - top) as u32),
        ))
    }
}

fn floor(v: f32) -> i32 { F32(v).floor().0 as i32 }

fn ceil(v: f32) -> i32 { F32(v).ceil().0 as i32 }

/// Region to clear before drawing `curr` over whatever `prev` left behind.
///
/// `None` when nothing changed or the union lies entirely off screen.
pub fn dirty_region(
    prev: Option<&EyeSnapshot>,
    curr: &EyeSnapshot,
    screen: Size,
) -> Option<Rectangle> {
    if prev == Some(curr) {
        return None;
    }
    let mut bounds = Bounds::of_eye(curr);
    if let Some(prev) = prev {
        bounds = bounds.union(Bounds::of_eye(prev));
    }
    bounds.clamp(screen)
}

// =============================================================================
// Eye Shape
// =============================================================================

/// Draw calls making up one eye.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EyeShape {
    /// Filled body and its corner radius.
    pub body: Rectangle,
    pub radius: u32,
    pub upper_lid: Option<(Point, Point)>,
    pub lower_lid: Option<(Point, Point)>,
}

impl EyeShape {
    /// Shape of `eye`, or `None` when it is too closed to be visible.
    pub fn of(eye: &EyeSnapshot) -> Option<Self> {
        let w = eye.width.max(0.0) as u32;
        let h = (eye.height * eye.open_amount).max(0.0) as u32;
        if h < VISIBILITY_FLOOR || w == 0 {
            return None;
        }

        let x = floor(eye.position.x) - (w / 2) as i32;
        let y = floor(eye.position.y) - (h / 2) as i32;
        let radius = (eye.border_radius.max(0.0) as u32).min(w / 2).min(h / 2);

        let slanted = |angle: f32| F32(angle).abs().0 > LID_THRESHOLD;
        let lid = |edge_y: i32, angle: f32| {
            let delta = (angle * w as f32 / 2.0) as i32;
            (Point::new(x, edge_y + delta), Point::new(x + w as i32, edge_y - delta))
        };
        let (upper_lid, lower_lid) = if slanted(eye.upper_lid_angle) || slanted(eye.lower_lid_angle) {
            (Some(lid(y, eye.upper_lid_angle)), Some(lid(y + h as i32, eye.lower_lid_angle)))
        } else {
            (None, None)
        };

        Some(Self {
            body: Rectangle::new(Point::new(x, y), Size::new(w, h)),
            radius,
            upper_lid,
            lower_lid,
        })
    }

    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        color: Rgb565,
    ) {
        surface.fill_rounded_rect(self.body, self.radius, color);
        for (p0, p1) in [self.upper_lid, self.lower_lid].into_iter().flatten() {
            surface.draw_line(p0, p1, color);
        }
    }
}

// =============================================================================
// Render State
// =============================================================================

/// Tracks whether the next frame must start from a blank screen.
pub struct RenderState {
    /// Whether this is the first frame (need full redraw).
    first_frame: bool,

    /// Whether a full clear was requested (e.g., background color change).
    display_cleared: bool,
}

impl RenderState {
    pub const fn new() -> Self {
        Self {
            first_frame: true,
            display_cleared: false,
        }
    }

    #[inline]
    pub const fn need_full_clear(&self) -> bool { self.first_frame || self.display_cleared }

    #[inline]
    pub const fn request_full_clear(&mut self) { self.display_cleared = true; }

    #[inline]
    pub const fn is_first_frame(&self) -> bool { self.first_frame }

    /// Call after the full clear has been issued.
    pub const fn mark_cleared(&mut self) {
        self.first_frame = false;
        self.display_cleared = false;
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Frame Rendering
// =============================================================================

/// Colors and bounds shared by every draw call of a frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Frame {
    pub screen: Size,
    pub background: Rgb565,
    pub foreground: Rgb565,
}

impl Frame {
    fn clear<S: Surface>(
        &self,
        surface: &mut S,
        region: Rectangle,
        stats: &mut RenderStats,
    ) {
        surface.clear_region(region, self.background);
        stats.record_clear(region.size.width * region.size.height);
    }
}

/// Paint the whole screen with the background and forget what was drawn.
pub fn full_clear<'a, S: Surface>(
    surface: &mut S,
    frame: &Frame,
    eyes: impl IntoIterator<Item = &'a mut Eye>,
    sweat: &mut SweatDrops,
) {
    surface.fill_full_screen(frame.background);
    for eye in eyes {
        eye.prev = None;
    }
    for drop in sweat.iter_mut() {
        drop.prev = None;
    }
}

/// What the render pass should show this frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Visibility {
    /// Per eye, indexed like [`crate::geometry::EyeSide::index`].
    pub eyes: [bool; EYES],
    pub sweat: bool,
}

/// Clear every dirty region, then draw every element the clears touched.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    frame: &Frame,
    eyes: &mut [Eye; EYES],
    sweat: &mut SweatDrops,
    visibility: Visibility,
    stats: &mut RenderStats,
) {
    let mut clears: Vec<Rectangle, MAX_CLEARS> = Vec::new();

    let mut changed = [false; EYES];
    for (index, eye) in eyes.iter_mut().enumerate() {
        let region = if visibility.eyes[index] {
            let curr = eye.snapshot();
            changed[index] = eye.prev != Some(curr);
            dirty_region(eye.prev.as_ref(), &curr, frame.screen)
        } else {
            eye.prev.take().and_then(|prev| Bounds::of_eye(&prev).clamp(frame.screen))
        };
        if let Some(region) = region {
            clears.push(region).ok();
        }
    }

    for drop in sweat.iter_mut() {
        let area = if visibility.sweat {
            let mut area = Bounds::of_rect(&drop.bounds());
            if let Some(prev) = drop.prev {
                area = area.union(Bounds::of_rect(&prev));
            }
            Some(area)
        } else {
            drop.prev.take().map(|prev| Bounds::of_rect(&prev))
        };
        if let Some(region) = area.and_then(|area| area.clamp(frame.screen)) {
            clears.push(region).ok();
        }
    }

    for region in clears.iter() {
        frame.clear(surface, *region, stats);
    }

    for (index, eye) in eyes.iter_mut().enumerate() {
        if !visibility.eyes[index] {
            continue;
        }
        let curr = eye.snapshot();
        let bounds = Bounds::of_eye(&curr);
        let touched = clears.iter().any(|region| bounds.intersects(&Bounds::of_rect(region)));
        if changed[index] || touched {
            draw_eye(surface, frame, &curr, stats);
            eye.prev = Some(curr);
        }
    }

    if visibility.sweat {
        for drop in sweat.iter_mut() {
            draw_drop(surface, frame, drop);
            drop.prev = Some(drop.bounds());
        }
    }
}

fn draw_eye<S: Surface>(
    surface: &mut S,
    frame: &Frame,
    eye: &EyeSnapshot,
    stats: &mut RenderStats,
) {
    if let Some(shape) = EyeShape::of(eye) {
        shape.draw(surface, frame.foreground);
        stats.eyes_drawn += 1;
    }
}

/// Round body at the bottom with a triangular tip on top.
fn draw_drop<S: Surface>(
    surface: &mut S,
    frame: &Frame,
    drop: &SweatDrop,
) {
    let center = drop.body_center();
    let radius = drop.radius();
    let r = radius as i32;
    surface.fill_triangle(
        drop.tip(),
        Point::new(center.x - r, center.y),
        Point::new(center.x + r, center.y),
        frame.foreground,
    );
    surface.fill_circle(center, radius, frame.foreground);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::colors::{BLACK, CYAN};
    use crate::geometry::Vec2;
    use crate::surface::GraphicsSurface;
    use crate::testing::{DrawCall, PixelBuffer, RecordingSurface, redrawn};

    const SCREEN: Size = Size::new(320, 240);

    fn frame() -> Frame {
        Frame {
            screen: SCREEN,
            background: BLACK,
            foreground: CYAN,
        }
    }

    fn snapshot(
        x: f32,
        y: f32,
        open: f32,
    ) -> EyeSnapshot {
        EyeSnapshot {
            position: Vec2::new(x, y),
            open_amount: open,
            width: 40.0,
            height: 50.0,
            border_radius: 15.0,
            upper_lid_angle: 0.0,
            lower_lid_angle: 0.0,
        }
    }

    // -------------------------------------------------------------------------
    // Bounds Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_eye_bounds_include_margin() {
        let bounds = Bounds::of_eye(&snapshot(100.0, 120.0, 1.0));
        // half width 20 + radius 15 + padding 6
        assert_eq!(bounds, Bounds {
            left: 59,
            top: 74,
            right: 141,
            bottom: 166,
        });
    }

    #[test]
    fn test_closed_eye_bounds_use_floor_height() {
        let bounds = Bounds::of_eye(&snapshot(100.0, 120.0, 0.0));
        assert_eq!(bounds.bottom - bounds.top, VISIBILITY_FLOOR as i32 + 2 * 21);
    }

    #[test]
    fn test_clamp_to_screen() {
        let bounds = Bounds {
            left: -10,
            top: -5,
            right: 20,
            bottom: 300,
        };
        assert_eq!(
            bounds.clamp(SCREEN),
            Some(Rectangle::new(Point::new(0, 0), Size::new(20, 240)))
        );
        let off_screen = Bounds {
            left: 400,
            top: 0,
            right: 420,
            bottom: 10,
        };
        assert_eq!(off_screen.clamp(SCREEN), None);
    }

    #[test]
    fn test_dirty_region_none_when_unchanged() {
        let s = snapshot(100.0, 120.0, 1.0);
        assert_eq!(dirty_region(Some(&s), &s, SCREEN), None);
    }

    #[test]
    fn test_dirty_region_first_draw_covers_current() {
        let s = snapshot(100.0, 120.0, 1.0);
        let region = dirty_region(None, &s, SCREEN).unwrap();
        assert_eq!(region, Bounds::of_eye(&s).clamp(SCREEN).unwrap());
    }

    proptest! {
        #[test]
        fn prop_dirty_region_contains_both_boxes(
            px in 0.0f32..320.0,
            py in 0.0f32..240.0,
            cx in 0.0f32..320.0,
            cy in 0.0f32..240.0,
            po in 0.0f32..=1.0,
            co in 0.0f32..=1.0,
        ) {
            let prev = snapshot(px, py, po);
            let curr = snapshot(cx, cy, co);
            prop_assume!(prev != curr);
            let region = dirty_region(Some(&prev), &curr, SCREEN);
            prop_assert!(region.is_some());
            let region = Bounds::of_rect(&region.unwrap());
            for s in [prev, curr] {
                if let Some(clamped) = Bounds::of_eye(&s).clamp(SCREEN) {
                    prop_assert!(region.contains(&Bounds::of_rect(&clamped)));
                }
            }
            prop_assert!(region.left >= 0 && region.top >= 0);
            prop_assert!(region.right <= 320 && region.bottom <= 240);
        }
    }

    // -------------------------------------------------------------------------
    // Shape Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_shape_hidden_below_floor() {
        assert_eq!(EyeShape::of(&snapshot(100.0, 100.0, 0.03)), None);
        assert!(EyeShape::of(&snapshot(100.0, 100.0, 0.1)).is_some());
    }

    #[test]
    fn test_shape_body_and_radius() {
        let shape = EyeShape::of(&snapshot(100.0, 120.0, 0.5)).unwrap();
        assert_eq!(shape.body, Rectangle::new(Point::new(80, 108), Size::new(40, 25)));
        assert_eq!(shape.radius, 12, "radius is confined to half the height");
        assert_eq!(shape.upper_lid, None);
    }

    #[test]
    fn test_shape_lid_lines() {
        let mut s = snapshot(100.0, 120.0, 1.0);
        s.upper_lid_angle = -0.48;
        s.lower_lid_angle = -0.18;
        let shape = EyeShape::of(&s).unwrap();
        // delta = angle * 40 / 2
        assert_eq!(shape.upper_lid, Some((Point::new(80, 95 - 9), Point::new(120, 95 + 9))));
        assert_eq!(shape.lower_lid, Some((Point::new(80, 145 - 3), Point::new(120, 145 + 3))));
    }

    #[test]
    fn test_small_angles_draw_no_lids() {
        let mut s = snapshot(100.0, 120.0, 1.0);
        s.upper_lid_angle = 0.08;
        s.lower_lid_angle = -0.1;
        assert_eq!(EyeShape::of(&s).unwrap().lower_lid, None);
    }

    // -------------------------------------------------------------------------
    // Rendering Tests
    // -------------------------------------------------------------------------

    const PAIR: Visibility = Visibility {
        eyes: [true, true],
        sweat: false,
    };

    fn pair(
        left_x: f32,
        right_x: f32,
    ) -> [Eye; EYES] {
        [
            Eye::new(40, 50, 15, Vec2::new(left_x, 120.0)),
            Eye::new(40, 50, 15, Vec2::new(right_x, 120.0)),
        ]
    }

    fn pixel_surface() -> GraphicsSurface<PixelBuffer> { GraphicsSurface::new(PixelBuffer::new(SCREEN, BLACK)) }

    #[test]
    fn test_render_frame_clears_then_draws_and_records_prev() {
        let mut surface = RecordingSurface::new(SCREEN);
        let mut stats = RenderStats::new();
        let mut eyes = pair(60.0, 260.0);
        let mut sweat = SweatDrops::new();

        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        assert!(matches!(surface.calls[0], DrawCall::ClearRegion(_, c) if c == BLACK));
        assert!(matches!(surface.calls[1], DrawCall::ClearRegion(_, c) if c == BLACK));
        assert!(matches!(surface.calls[2], DrawCall::FillRoundedRect(_, 15, c) if c == CYAN));
        assert!(eyes.iter().all(|eye| eye.prev == Some(eye.snapshot())));
        assert_eq!(stats.eyes_drawn, 2);

        surface.clear();
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        assert!(surface.calls.is_empty(), "unchanged eyes must not be redrawn");
    }

    #[test]
    fn test_far_apart_eyes_redraw_alone() {
        let mut surface = RecordingSurface::new(SCREEN);
        let mut stats = RenderStats::new();
        let mut eyes = pair(60.0, 260.0);
        let mut sweat = SweatDrops::new();
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        surface.clear();

        eyes[1].open_amount = 0.5;
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        assert_eq!(surface.region_clears(), 1);
        assert_eq!(surface.eye_fills(), 1);
    }

    #[test]
    fn test_overlapped_neighbor_is_redrawn() {
        let mut surface = RecordingSurface::new(SCREEN);
        let mut stats = RenderStats::new();
        // 60 px apart: each clear box reaches into the other body.
        let mut eyes = pair(130.0, 190.0);
        let mut sweat = SweatDrops::new();
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        surface.clear();

        eyes[1].open_amount = 0.5;
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        assert_eq!(surface.region_clears(), 1);
        assert_eq!(surface.eye_fills(), 2);
        let first_draw = surface.calls.iter().position(|c| matches!(c, DrawCall::FillRoundedRect(..)));
        let last_clear = surface.calls.iter().rposition(|c| matches!(c, DrawCall::ClearRegion(..)));
        assert!(last_clear < first_draw, "every clear precedes every draw");
    }

    #[test]
    fn test_render_closed_eye_only_clears() {
        let mut surface = RecordingSurface::new(SCREEN);
        let mut stats = RenderStats::new();
        let mut eyes = pair(60.0, 260.0);
        let mut sweat = SweatDrops::new();
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        surface.clear();

        eyes[0].open_amount = 0.0;
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        assert_eq!(surface.calls.len(), 1);
        assert_eq!(surface.region_clears(), 1);
    }

    #[test]
    fn test_hidden_eye_clears_once() {
        let mut surface = RecordingSurface::new(SCREEN);
        let mut stats = RenderStats::new();
        let mut eyes = pair(60.0, 260.0);
        let mut sweat = SweatDrops::new();
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        surface.clear();

        let cyclops = Visibility {
            eyes: [true, false],
            sweat: false,
        };
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, cyclops, &mut stats);
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, cyclops, &mut stats);
        assert_eq!(surface.region_clears(), 1);
        assert_eq!(surface.eye_fills(), 0);
        assert_eq!(eyes[1].prev, None);
    }

    #[test]
    fn test_render_sweat_draws_circle_and_tip() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let mut surface = RecordingSurface::new(SCREEN);
        let mut stats = RenderStats::new();
        let mut eyes = pair(60.0, 260.0);
        let mut sweat = SweatDrops::new();
        sweat.step(SCREEN.width, &mut rng);
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        surface.clear();

        let sweating = Visibility {
            eyes: [true, true],
            sweat: true,
        };
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, sweating, &mut stats);
        let circles = surface.calls.iter().filter(|c| matches!(c, DrawCall::FillCircle(..))).count();
        let tips = surface.calls.iter().filter(|c| matches!(c, DrawCall::FillTriangle(..))).count();
        assert_eq!(circles, 3);
        assert_eq!(tips, 3);
        assert!(sweat.iter().all(|d| d.prev.is_some()));

        surface.clear();
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        assert_eq!(surface.region_clears(), 3);
        assert!(sweat.iter().all(|d| d.prev.is_none()));
    }

    // -------------------------------------------------------------------------
    // Pixel Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_touching_eyes_keep_every_pixel() {
        let mut surface = pixel_surface();
        let mut stats = RenderStats::new();
        let mut eyes = pair(130.0, 190.0);
        let mut sweat = SweatDrops::new();

        for open in [1.0, 0.6, 0.2, 0.0, 0.4, 1.0] {
            eyes[1].open_amount = open;
            render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
            let expected = redrawn(&frame(), &eyes, &sweat, PAIR);
            assert_eq!(surface.inner().diff(&expected), 0, "right eye open {open}");
        }
        // Rightmost body column of the left eye.
        assert_eq!(surface.inner().pixel(Point::new(149, 120)), Some(CYAN));
    }

    #[test]
    fn test_square_angry_lids_leave_no_trail() {
        let mut surface = pixel_surface();
        let mut stats = RenderStats::new();
        let mut sweat = SweatDrops::new();
        let mut eyes = pair(60.0, 260.0);
        for eye in &mut eyes {
            eye.border_radius = 0.0;
            eye.width = 38.0;
            eye.height = 34.0;
            eye.upper_lid_angle = -0.48;
            eye.lower_lid_angle = -0.18;
        }

        for step in 0..8 {
            for eye in &mut eyes {
                eye.position.x += 4.0;
                eye.position.y += 3.0 + step as f32;
            }
            render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
            let expected = redrawn(&frame(), &eyes, &sweat, PAIR);
            assert_eq!(surface.inner().diff(&expected), 0, "step {step}");
        }
    }

    #[test]
    fn test_sweat_clears_spare_eye_in_top_strip() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let mut surface = pixel_surface();
        let mut stats = RenderStats::new();
        let mut sweat = SweatDrops::new();
        // Left eye body spans the middle band's first drop at x = 30.
        let mut eyes = [
            Eye::new(40, 50, 15, Vec2::new(40.0, 30.0)),
            Eye::new(40, 50, 15, Vec2::new(260.0, 120.0)),
        ];
        let sweating = Visibility {
            eyes: [true, true],
            sweat: true,
        };

        for frame_index in 0..40 {
            sweat.step(SCREEN.width, &mut rng);
            render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, sweating, &mut stats);
            let expected = redrawn(&frame(), &eyes, &sweat, sweating);
            assert_eq!(surface.inner().diff(&expected), 0, "frame {frame_index}");
        }
        render_frame(&mut surface, &frame(), &mut eyes, &mut sweat, PAIR, &mut stats);
        assert_eq!(surface.inner().diff(&redrawn(&frame(), &eyes, &sweat, PAIR)), 0);
    }

    #[test]
    fn test_lid_overhang_inside_bounds() {
        let mut s = snapshot(100.0, 120.0, 1.0);
        s.border_radius = 0.0;
        s.upper_lid_angle = -0.48;
        let shape = EyeShape::of(&s).unwrap();
        let bounds = Bounds::of_eye(&s);
        let (p0, p1) = shape.upper_lid.unwrap();
        for p in [p0, p1] {
            assert!(p.y >= bounds.top && p.y < bounds.bottom, "{p:?} outside {bounds:?}");
        }
    }

    #[test]
    fn test_render_state_full_clear_flow() {
        let mut state = RenderState::new();
        assert!(state.is_first_frame());
        assert!(state.need_full_clear());
        state.mark_cleared();
        assert!(!state.need_full_clear());
        state.request_full_clear();
        assert!(state.need_full_clear());
        assert!(!state.is_first_frame());
    }
}
