//! Software raster targets: an RGBA8 pixel buffer and a per-column depth buffer.

use std::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
};
use glam::Vec2;
use mobile_strike_core::ScreenSize;

use crate::{Color, RenderingError};

/// Row-major RGBA8 pixel buffer the renderer draws into.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Allocates a transparent buffer covering the provided surface.
    pub fn new(screen: ScreenSize) -> Result<Self, RenderingError> {
        if screen.width() == 0 || screen.height() == 0 {
            return Err(RenderingError::EmptySurface {
                width: screen.width(),
                height: screen.height(),
            });
        }
        let len = screen.width() as usize * screen.height() as usize * 4;
        Ok(Self {
            width: screen.width(),
            height: screen.height(),
            pixels: vec![0; len],
        })
    }

    /// Number of pixel columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of pixel rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions of the buffer as a render surface.
    #[must_use]
    pub const fn size(&self) -> ScreenSize {
        ScreenSize::new(self.width, self.height)
    }

    /// Raw RGBA8 bytes, row by row.
    #[must_use]
    pub fn as_rgba8(&self) -> &[u8] {
        &self.pixels
    }

    /// Reads a pixel, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let index = self.index(x, y)?;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[index..index + 4]);
        Some(out)
    }

    /// Overwrites every pixel with the provided color.
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Alpha-blends a single pixel; coordinates outside the buffer are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let alpha = color.alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let source = color.to_rgba8();
        let target = &mut self.pixels[index..index + 4];
        if alpha >= 1.0 {
            target.copy_from_slice(&source);
            return;
        }
        for channel in 0..3 {
            let blended =
                f32::from(source[channel]) * alpha + f32::from(target[channel]) * (1.0 - alpha);
            target[channel] = blended.round().clamp(0.0, 255.0) as u8;
        }
        target[3] = 255;
    }

    /// Wraps the buffer as a draw target that blends at the provided opacity.
    pub fn blended(&mut self, alpha: f32) -> Blended<'_> {
        Blended { frame: self, alpha }
    }

    /// Draws an embedded-graphics item, blending every pixel at `alpha`.
    pub fn paint<D>(&mut self, item: &D, alpha: f32)
    where
        D: Drawable<Color = Rgb888>,
    {
        let _ = item.draw(&mut self.blended(alpha));
    }

    /// Fills the axis-aligned rectangle whose corner is `(x, y)`.
    ///
    /// Edges are rounded to the nearest pixel boundary; negative extents
    /// extend the rectangle to the left or upwards.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let area = rectangle(x, y, width, height).intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return;
        }
        self.paint(&area.into_styled(fill(color)), color.alpha);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(index) = self.index(coord.x, coord.y) {
                self.pixels[index..index + 4].copy_from_slice(&[
                    color.r(),
                    color.g(),
                    color.b(),
                    255,
                ]);
            }
        }
        Ok(())
    }
}

/// Draw target over a [`Framebuffer`] that alpha-blends every pixel at a fixed opacity.
pub struct Blended<'a> {
    frame: &'a mut Framebuffer,
    alpha: f32,
}

impl OriginDimensions for Blended<'_> {
    fn size(&self) -> Size {
        Size::new(self.frame.width, self.frame.height)
    }
}

impl DrawTarget for Blended<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let color = Color::from_rgb_u8(color.r(), color.g(), color.b()).with_alpha(self.alpha);
            self.frame.blend_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}

/// Rounds a screen position to the nearest pixel.
pub(crate) fn point(position: Vec2) -> Point {
    Point::new(position.x.round() as i32, position.y.round() as i32)
}

/// Pixel rectangle covering `(x, y)` to `(x + width, y + height)` with rounded edges.
pub(crate) fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Rectangle {
    let (left, right) = span(x, width);
    let (top, bottom) = span(y, height);
    Rectangle::new(
        Point::new(left, top),
        Size::new((right - left) as u32, (bottom - top) as u32),
    )
}

/// Circle diameter in whole pixels.
pub(crate) fn diameter(radius: f32) -> u32 {
    (radius * 2.0).round().max(0.0) as u32
}

pub(crate) fn fill(color: Color) -> PrimitiveStyle<Rgb888> {
    PrimitiveStyle::with_fill(color.to_rgb888())
}

/// Stroke drawn inside the outline of closed shapes.
pub(crate) fn outline(color: Color, thickness: f32) -> PrimitiveStyle<Rgb888> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color.to_rgb888())
        .stroke_width(thickness.round().max(1.0) as u32)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}

fn span(start: f32, extent: f32) -> (i32, i32) {
    let (low, high) = if extent < 0.0 {
        (start + extent, start)
    } else {
        (start, start + extent)
    };
    (low.round() as i32, high.round() as i32)
}

/// Perpendicular wall distance recorded for every screen column.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
}

impl DepthBuffer {
    /// Creates a buffer with one infinitely distant entry per column.
    #[must_use]
    pub fn new(columns: u32) -> Self {
        Self {
            depths: vec![f32::INFINITY; columns as usize],
        }
    }

    /// Number of columns tracked.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.depths.len()
    }

    /// Records the wall distance for a column.
    pub fn set(&mut self, column: u32, depth: f32) {
        if let Some(slot) = self.depths.get_mut(column as usize) {
            *slot = depth;
        }
    }

    /// Wall distance at a column; columns outside the screen report zero.
    #[must_use]
    pub fn get(&self, column: i32) -> f32 {
        usize::try_from(column)
            .ok()
            .and_then(|column| self.depths.get(column))
            .copied()
            .unwrap_or(0.0)
    }

    /// Reports whether something at `depth` is in front of the wall at `column`.
    #[must_use]
    pub fn is_visible(&self, column: i32, depth: f32) -> bool {
        depth < self.get(column)
    }

    /// Resets every column to infinitely distant.
    pub fn reset(&mut self) {
        self.depths.fill(f32::INFINITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Circle, Triangle};

    fn buffer() -> Framebuffer {
        Framebuffer::new(ScreenSize::new(8, 6)).expect("non-empty surface")
    }

    #[test]
    fn empty_surfaces_are_rejected() {
        assert_eq!(
            Framebuffer::new(ScreenSize::new(0, 4)),
            Err(RenderingError::EmptySurface {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn rectangles_are_clipped_to_the_buffer() {
        let mut frame = buffer();
        frame.fill_rect(-2.0, 4.0, 4.0, 10.0, Color::from_rgb_u8(255, 0, 0));

        assert_eq!(frame.pixel(0, 4), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(1, 5), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(2, 4), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(0, 3), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(0, 6), None);
    }

    #[test]
    fn translucent_colors_blend_over_the_background() {
        let mut frame = buffer();
        frame.clear(Color::from_rgb_u8(0, 0, 200));
        frame.blend_pixel(3, 3, Color::new(1.0, 0.0, 0.0, 0.5));

        assert_eq!(frame.pixel(3, 3), Some([128, 0, 100, 255]));
    }

    #[test]
    fn triangles_cover_their_interior_only() {
        let mut frame = buffer();
        let triangle = Triangle::new(Point::new(0, 0), Point::new(7, 0), Point::new(0, 5));
        frame.paint(&triangle.into_styled(fill(Color::WHITE)), 1.0);

        assert_eq!(frame.pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(7, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn translucent_circles_blend_through_the_target() {
        let mut frame = buffer();
        frame.clear(Color::BLACK);
        let circle = Circle::with_center(Point::new(4, 3), diameter(3.0));
        frame.paint(&circle.into_styled(fill(Color::WHITE)), 0.5);

        assert_eq!(frame.pixel(4, 3), Some([128, 128, 128, 255]));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn inside_outlines_leave_the_centre_untouched() {
        let mut frame = buffer();
        let border = rectangle(0.0, 0.0, 8.0, 6.0).into_styled(outline(Color::WHITE, 1.0));
        frame.paint(&border, 1.0);

        assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(7, 5), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn opaque_draws_write_straight_into_the_buffer() {
        let mut frame = buffer();
        let _ = Pixel(Point::new(2, 1), Rgb888::new(1, 2, 3)).draw(&mut frame);
        let _ = Pixel(Point::new(-1, 1), Rgb888::new(1, 2, 3)).draw(&mut frame);

        assert_eq!(frame.pixel(2, 1), Some([1, 2, 3, 255]));
    }

    #[test]
    fn depth_buffer_hides_sprites_behind_walls() {
        let mut depth = DepthBuffer::new(4);
        depth.set(1, 3.0);

        assert!(depth.is_visible(1, 2.5));
        assert!(!depth.is_visible(1, 3.5));
        assert!(depth.is_visible(2, 100.0));
        assert!(!depth.is_visible(-1, 0.1));
        assert!(!depth.is_visible(4, 0.1));
    }
}
