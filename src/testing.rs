//! Test helpers.

use core::convert::Infallible;
use std::vec;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::geometry::Eye;
use crate::profiling::RenderStats;
use crate::render::{EYES, Frame, Visibility, render_frame};
use crate::surface::{GraphicsSurface, Surface};
use crate::sweat::SweatDrops;

/// One recorded [`Surface`] call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawCall {
    FillFullScreen(Rgb565),
    ClearRegion(Rectangle, Rgb565),
    FillRoundedRect(Rectangle, u32, Rgb565),
    FillTriangle(Point, Point, Point, Rgb565),
    DrawLine(Point, Point, Rgb565),
    FillCircle(Point, u32, Rgb565),
}

/// Surface that remembers every call instead of drawing.
pub struct RecordingSurface {
    pub size: Size,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) { self.calls.clear(); }

    pub fn region_clears(&self) -> usize { self.calls.iter().filter(|c| matches!(c, DrawCall::ClearRegion(..))).count() }

    pub fn full_clears(&self) -> usize { self.calls.iter().filter(|c| matches!(c, DrawCall::FillFullScreen(_))).count() }

    pub fn eye_fills(&self) -> usize { self.calls.iter().filter(|c| matches!(c, DrawCall::FillRoundedRect(..))).count() }

    pub fn cleared_regions(&self) -> impl Iterator<Item = Rectangle> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::ClearRegion(area, _) => Some(*area),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size { self.size }

    fn fill_full_screen(
        &mut self,
        color: Rgb565,
    ) {
        self.calls.push(DrawCall::FillFullScreen(color));
    }

    fn clear_region(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        self.calls.push(DrawCall::ClearRegion(area, color));
    }

    fn fill_rounded_rect(
        &mut self,
        area: Rectangle,
        radius: u32,
        color: Rgb565,
    ) {
        self.calls.push(DrawCall::FillRoundedRect(area, radius, color));
    }

    fn fill_triangle(
        &mut self,
        p0: Point,
        p1: Point,
        p2: Point,
        color: Rgb565,
    ) {
        self.calls.push(DrawCall::FillTriangle(p0, p1, p2, color));
    }

    fn draw_line(
        &mut self,
        p0: Point,
        p1: Point,
        color: Rgb565,
    ) {
        self.calls.push(DrawCall::DrawLine(p0, p1, color));
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    ) {
        self.calls.push(DrawCall::FillCircle(center, radius, color));
    }
}

// =============================================================================
// Pixel Buffer
// =============================================================================

/// Full-size in-memory display, for checking what actually lands on screen.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl PixelBuffer {
    pub fn new(
        size: Size,
        color: Rgb565,
    ) -> Self {
        Self {
            size,
            pixels: vec![color; (size.width * size.height) as usize],
        }
    }

    fn index(
        &self,
        point: Point,
    ) -> Option<usize> {
        let inside = point.x >= 0 && point.y >= 0 && point.x < self.size.width as i32 && point.y < self.size.height as i32;
        inside.then(|| point.y as usize * self.size.width as usize + point.x as usize)
    }

    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb565> {
        self.index(point).map(|index| self.pixels[index])
    }

    /// Number of pixels that differ from `other`.
    pub fn diff(
        &self,
        other: &Self,
    ) -> usize {
        self.pixels.iter().zip(&other.pixels).filter(|(a, b)| a != b).count()
    }

    pub fn count(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for PixelBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = self.index(point) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}

/// The screen a from-scratch redraw of the given state would produce.
pub fn redrawn(
    frame: &Frame,
    eyes: &[Eye; EYES],
    sweat: &SweatDrops,
    visibility: Visibility,
) -> PixelBuffer {
    let mut eyes = *eyes;
    for eye in &mut eyes {
        eye.prev = None;
    }
    let mut sweat = sweat.clone();
    for drop in sweat.iter_mut() {
        drop.prev = None;
    }
    let mut surface = GraphicsSurface::new(PixelBuffer::new(frame.screen, frame.background));
    render_frame(&mut surface, frame, &mut eyes, &mut sweat, visibility, &mut RenderStats::new());
    surface.into_inner()
}
