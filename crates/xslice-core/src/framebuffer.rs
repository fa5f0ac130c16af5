//! RAM framebuffer with change tracking.
//!
//! Widgets can draw straight into any `DrawTarget<Color = Rgb565>`, but on
//! slow SPI panels it pays to render a page into this buffer first and then
//! push only the region that actually changed. It also gives tests a display
//! whose pixels can be read back.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Bounding box of pixels changed since the last flush, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Heap-allocated `Rgb565` framebuffer implementing [`DrawTarget`].
///
/// Out-of-bounds pixels are clipped silently. Writing a pixel with the
/// color it already has does not mark it dirty.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a black framebuffer of the given size.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Color at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = self.index_of(point)?;
        Some(self.pixels[y * self.width + x])
    }

    /// Region changed since the last flush (or `take_dirty`), if any.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(DirtyRect::to_rectangle)
    }

    /// Return and reset the changed region without flushing it anywhere.
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        self.dirty.take().map(DirtyRect::to_rectangle)
    }

    /// Copy the changed region to `display` and reset the change state.
    ///
    /// Does nothing when no pixel changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };
        let area = rect.to_rectangle();
        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let width = rect.max_x - rect.min_x + 1;
        let colors = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let start = y * stride + rect.min_x;
            pixels[start..start + width].iter().copied()
        });
        display.fill_contiguous(&area, colors)
    }

    fn index_of(&self, point: Point) -> Option<(usize, usize)> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = self.index_of(point) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Row-major order, so points and colors pair up even when clipped
        for (point, color) in area.points().zip(colors) {
            if let Some((x, y)) = self.index_of(point) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };
        for y in clipped.top_left.y..=bottom_right.y {
            for x in clipped.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let area = self.bounding_box();
        self.fill_solid(&area, color)
    }
}
