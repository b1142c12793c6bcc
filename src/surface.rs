//! Drawing surface abstraction.
//!
//! The render planner only needs a handful of filled primitives. [`Surface`]
//! names exactly that capability set so the engine can run against a real
//! display, the desktop simulator, or a recording fake in tests.
//!
//! [`GraphicsSurface`] adapts any `embedded-graphics` [`DrawTarget`] with an
//! RGB565 color type. Drawing errors are dropped: a failed SPI transfer costs a
//! frame, never the animation.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle};

/// Primitive operations the render planner issues.
pub trait Surface {
    /// Drawable size in pixels.
    fn size(&self) -> Size;

    /// Paint the whole surface. Used only when (re)initializing.
    fn fill_full_screen(
        &mut self,
        color: Rgb565,
    );

    /// Paint `area` with the background color.
    fn clear_region(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    );

    fn fill_rounded_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    );

    fn fill_triangle(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        color: Rgb565,
    );

    /// One pixel wide line.
    fn draw_line(
        &mut self,
        p0: Point,
        p1: Point,
        color: Rgb565,
    );

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    );
}

/// [`Surface`] over an `embedded-graphics` draw target.
pub struct GraphicsSurface<D> {
    target: D,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(target: D) -> Self { Self { target } }

    #[inline]
    pub const fn inner(&self) -> &D { &self.target }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut D { &mut self.target }

    pub fn into_inner(self) -> D { self.target }
}

impl<D> Surface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> Size { self.target.bounding_box().size }

    fn fill_full_screen(
        &mut self,
        color: Rgb565,
    ) {
        self.target.clear(color).ok();
    }

    fn clear_region(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        self.target.fill_solid(&area, color).ok();
    }

    fn fill_rounded_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) {
        RoundedRectangle::with_equal_corners(area, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_triangle(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        color: Rgb565,
    ) {
        Triangle::new(p0, p1, p2)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_line(
        &mut self,
        p0: Point,
        p1: Point,
        color: Rgb565,
    ) {
        Line::new(p0, p1)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
            .ok();
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    ) {
        Circle::with_center(center, 2 * radius + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }
}
