//! Drawing on the in-memory frame
//!
//! [`FrameBuffer`] wraps a [`Raster`] and byte-swaps every color on the way
//! in (and back on the way out) when the panel expects the two bytes of each
//! RGB565 word in the opposite order. All primitives take plain `u16` RGB565
//! colors, as produced by [`color565`](crate::color::color565).
//!
//! Nothing here touches the hardware; call
//! [`Display::present`](crate::display::Display::present) to send the frame.
//!
//! `FrameBuffer` is also an embedded-graphics [`DrawTarget`], so fonts,
//! images and primitives from that ecosystem draw straight into it.
//!
//! ## Example
//!
//! ```
//! use st7789_fb::color::{BLACK, RED, WHITE, color565};
//! use st7789_fb::framebuffer::{FrameBuffer, QUADRANT_ALL};
//!
//! let mut fb = match FrameBuffer::new([0u8; 64 * 32 * 2], 64, 32, true) {
//!     Some(fb) => fb,
//!     None => return,
//! };
//! fb.fill(BLACK);
//! fb.rect(2, 2, 60, 28, WHITE, false);
//! fb.ellipse(32, 16, 10, 6, RED, true, QUADRANT_ALL);
//! fb.text("Hi", 4, 4, color565(0, 255, 0));
//! assert_eq!(fb.get_pixel(32, 16), Some(RED));
//! ```

use core::convert::Infallible;
use embedded_graphics::{
    Drawable,
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_8X13},
    primitives::{Line, Primitive, PrimitiveStyle},
    text::{Baseline, Text},
};
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{
        Rgb565,
        raw::{RawData, RawU16},
    },
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::swap_bytes;
use crate::raster::Raster;

/// Top-right quarter of an ellipse
pub const QUADRANT_1: u8 = 0x01;
/// Top-left quarter of an ellipse
pub const QUADRANT_2: u8 = 0x02;
/// Bottom-left quarter of an ellipse
pub const QUADRANT_3: u8 = 0x04;
/// Bottom-right quarter of an ellipse
pub const QUADRANT_4: u8 = 0x08;
/// Whole ellipse
pub const QUADRANT_ALL: u8 = 0x0F;

/// Largest polygon [`FrameBuffer::poly`] fills; extra vertices are dropped
pub const MAX_POLY_VERTICES: usize = 64;

/// Font used by [`FrameBuffer::text`]
pub const DEFAULT_FONT: &MonoFont<'static> = &FONT_8X13;

/// RGB565 frame with optional byte swap on write
pub struct FrameBuffer<B> {
    raster: Raster<B>,
    byte_swap: bool,
}

impl<B> FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `buffer` as a `width` x `height` frame
    ///
    /// Returns `None` if the buffer holds fewer than `width * height * 2` bytes.
    pub fn new(buffer: B, width: u16, height: u16, byte_swap: bool) -> Option<Self> {
        Raster::new(buffer, width, height).map(|raster| Self { raster, byte_swap })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.raster.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.raster.height()
    }

    /// Whether colors are byte-swapped on write
    pub fn byte_swap(&self) -> bool {
        self.byte_swap
    }

    fn encode(&self, color: u16) -> u16 {
        if self.byte_swap {
            swap_bytes(color)
        } else {
            color
        }
    }

    fn encode_rgb(&self, color: u16) -> Rgb565 {
        Rgb565::from(RawU16::new(self.encode(color)))
    }

    /// Fill the whole frame
    pub fn fill(&mut self, color: u16) {
        let word = self.encode(color);
        self.raster.fill_raw(word);
    }

    /// Set one pixel
    pub fn pixel(&mut self, x: i32, y: i32, color: u16) {
        let word = self.encode(color);
        self.raster.set_raw(x, y, word);
    }

    /// Read one pixel back in caller byte order, `None` outside the frame
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u16> {
        self.raster.raw(x, y).map(|word| self.encode(word))
    }

    /// Horizontal line of `w` pixels starting at `(x, y)`
    pub fn hline(&mut self, x: i32, y: i32, w: i32, color: u16) {
        self.fill_rect(x, y, w, 1, color);
    }

    /// Vertical line of `h` pixels starting at `(x, y)`
    pub fn vline(&mut self, x: i32, y: i32, h: i32, color: u16) {
        self.fill_rect(x, y, 1, h, color);
    }

    /// Line between two points, both ends included
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: u16) {
        let style = PrimitiveStyle::with_stroke(self.encode_rgb(color), 1);
        let Ok(()) = Line::new(Point::new(x1, y1), Point::new(x2, y2))
            .into_styled(style)
            .draw(&mut self.raster);
    }

    /// Rectangle outline, or filled when `fill` is set
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16, fill: bool) {
        if fill {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        let word = self.encode(color);
        let bottom = y.saturating_add(h).saturating_sub(1);
        let right = x.saturating_add(w).saturating_sub(1);
        self.raster.fill_rect_raw(x, y, w, 1, word);
        self.raster.fill_rect_raw(x, bottom, w, 1, word);
        self.raster.fill_rect_raw(x, y, 1, h, word);
        self.raster.fill_rect_raw(right, y, 1, h, word);
    }

    /// Filled rectangle, clipped to the frame
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        let word = self.encode(color);
        self.raster.fill_rect_raw(x, y, w, h, word);
    }

    /// Ellipse centred on `(x, y)` with radii `xr` and `yr`
    ///
    /// `mask` selects quadrants ([`QUADRANT_1`] .. [`QUADRANT_4`], or
    /// [`QUADRANT_ALL`]). A circle is an ellipse with equal radii. With one
    /// radius zero only the centre and the two ends of the other axis are
    /// plotted; with both zero, the centre alone.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: i32,
        y: i32,
        xr: i32,
        yr: i32,
        color: u16,
        fill: bool,
        mask: u8,
    ) {
        let word = self.encode(color);
        if xr < 0 || yr < 0 {
            return;
        }
        if xr == 0 && yr == 0 {
            if mask & QUADRANT_ALL != 0 {
                self.raster.set_raw(x, y, word);
            }
            return;
        }
        let (a, b) = (i64::from(xr), i64::from(yr));
        let two_a_sq = 2 * a * a;
        let two_b_sq = 2 * b * b;

        // Flat part of the curve, stepping y
        let (mut px, mut py) = (a, 0);
        let mut x_change = b * b * (1 - 2 * a);
        let mut y_change = a * a;
        let mut error = 0;
        let mut stop_x = two_b_sq * a;
        let mut stop_y = 0;
        while stop_x >= stop_y {
            self.ellipse_points(x, y, px, py, word, fill, mask);
            py += 1;
            stop_y += two_a_sq;
            error += y_change;
            y_change += two_a_sq;
            if 2 * error + x_change > 0 {
                px -= 1;
                stop_x -= two_b_sq;
                error += x_change;
                x_change += two_b_sq;
            }
        }

        // Steep part, stepping x
        let (mut px, mut py) = (0, b);
        let mut x_change = b * b;
        let mut y_change = a * a * (1 - 2 * b);
        let mut error = 0;
        let mut stop_x = 0;
        let mut stop_y = two_a_sq * b;
        while stop_x <= stop_y {
            self.ellipse_points(x, y, px, py, word, fill, mask);
            px += 1;
            stop_x += two_b_sq;
            error += x_change;
            x_change += two_b_sq;
            if 2 * error + y_change > 0 {
                py -= 1;
                stop_y -= two_a_sq;
                error += y_change;
                y_change += two_a_sq;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn ellipse_points(
        &mut self,
        cx: i32,
        cy: i32,
        dx: i64,
        dy: i64,
        word: u16,
        fill: bool,
        mask: u8,
    ) {
        let dx = i32::try_from(dx).unwrap_or(i32::MAX);
        let dy = i32::try_from(dy).unwrap_or(i32::MAX);
        let (left, right) = (cx.saturating_sub(dx), cx.saturating_add(dx));
        let (top, bottom) = (cy.saturating_sub(dy), cy.saturating_add(dy));
        let span = dx.saturating_add(1);
        if fill {
            if mask & QUADRANT_1 != 0 {
                self.raster.fill_rect_raw(cx, top, span, 1, word);
            }
            if mask & QUADRANT_2 != 0 {
                self.raster.fill_rect_raw(left, top, span, 1, word);
            }
            if mask & QUADRANT_3 != 0 {
                self.raster.fill_rect_raw(left, bottom, span, 1, word);
            }
            if mask & QUADRANT_4 != 0 {
                self.raster.fill_rect_raw(cx, bottom, span, 1, word);
            }
        } else {
            if mask & QUADRANT_1 != 0 {
                self.raster.set_raw(right, top, word);
            }
            if mask & QUADRANT_2 != 0 {
                self.raster.set_raw(left, top, word);
            }
            if mask & QUADRANT_3 != 0 {
                self.raster.set_raw(left, bottom, word);
            }
            if mask & QUADRANT_4 != 0 {
                self.raster.set_raw(right, bottom, word);
            }
        }
    }

    /// Polygon with vertices relative to `(x, y)`
    ///
    /// The outline closes back to the first vertex. Filling uses the
    /// even-odd rule, one scanline at a time.
    pub fn poly(&mut self, x: i32, y: i32, points: &[Point], color: u16, fill: bool) {
        if points.is_empty() {
            return;
        }
        let points = if points.len() > MAX_POLY_VERTICES {
            log::warn!(
                "Polygon has {} vertices, drawing the first {}",
                points.len(),
                MAX_POLY_VERTICES
            );
            &points[..MAX_POLY_VERTICES]
        } else {
            points
        };

        if !fill {
            let mut from = points[0];
            for &to in points.iter().rev() {
                let (x1, y1) = (x.saturating_add(from.x), y.saturating_add(from.y));
                let (x2, y2) = (x.saturating_add(to.x), y.saturating_add(to.y));
                self.line(x1, y1, x2, y2, color);
                from = to;
            }
            return;
        }

        let word = self.encode(color);
        // Only rows that land on the frame can change it
        let y_min = points.iter().map(|p| p.y).min().unwrap_or(0);
        let y_max = points.iter().map(|p| p.y).max().unwrap_or(0);
        let first_row = y_min.max(y.saturating_neg());
        let last_row = y_max.min(i32::from(self.height()).saturating_sub(1).saturating_sub(y));
        let mut nodes = [0i32; MAX_POLY_VERTICES];

        for row in first_row..=last_row {
            let mut count = 0;
            let mut from = points[0];
            for &to in points.iter().rev() {
                let crosses = (from.y > row && to.y <= row) || (from.y <= row && to.y > row);
                if from.y != to.y && crosses {
                    nodes[count] = edge_crossing(from, to, row);
                    count += 1;
                } else if row == from.y.max(to.y) {
                    // The crossing test skips the bottom pixel of each edge
                    let (x1, y1) = (x.saturating_add(from.x), y.saturating_add(from.y));
                    let (x2, y2) = (x.saturating_add(to.x), y.saturating_add(to.y));
                    if from.y < to.y {
                        self.raster.set_raw(x2, y2, word);
                    } else if to.y < from.y {
                        self.raster.set_raw(x1, y1, word);
                    } else {
                        self.line(x1, y1, x2, y2, color);
                    }
                }
                from = to;
            }

            let nodes = &mut nodes[..count];
            nodes.sort_unstable();
            let row_y = y.saturating_add(row);
            for pair in nodes.chunks_exact(2) {
                let width = pair[1].saturating_sub(pair[0]).saturating_add(1);
                self.raster.fill_rect_raw(x.saturating_add(pair[0]), row_y, width, 1, word);
            }
        }
    }

    /// Text in [`DEFAULT_FONT`] with its top-left corner at `(x, y)`
    pub fn text(&mut self, text: &str, x: i32, y: i32, color: u16) {
        self.text_with_font(text, x, y, color, DEFAULT_FONT);
    }

    /// Text in a caller-chosen bitmap font, top-left corner at `(x, y)`
    ///
    /// Glyph backgrounds are left untouched.
    pub fn text_with_font(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: u16,
        font: &MonoFont<'_>,
    ) {
        let style = MonoTextStyle::new(font, self.encode_rgb(color));
        let Ok(_) = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.raster);
    }

    /// Frame bytes in wire order, `width * height * 2` long
    pub fn as_bytes(&self) -> &[u8] {
        self.raster.as_bytes()
    }

    /// Give the storage back
    pub fn release(self) -> B {
        self.raster.release()
    }
}

/// Column where the edge `from`-`to` crosses `row`, rounded to the nearest pixel
///
/// Works in 1/32 pixel fixed point, widened so far off-frame vertices
/// cannot overflow.
fn edge_crossing(from: Point, to: Point, row: i32) -> i32 {
    let (x1, y1) = (i128::from(from.x), i128::from(from.y));
    let (x2, y2) = (i128::from(to.x), i128::from(to.y));
    let row = i128::from(row);
    let node = (32 * x1 + 32 * (x2 - x1) * (row - y1) / (y2 - y1) + 16) / 32;
    node.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

impl<B> DrawTarget for FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.pixel(x, y, RawU16::from(color).into_inner());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let color = self.encode_rgb(RawU16::from(color).into_inner());
        self.raster.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(RawU16::from(color).into_inner());
        Ok(())
    }
}

impl<B> OriginDimensions for FrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        self.raster.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, BLUE, GREEN, RED, WHITE};
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::primitives::{Circle, PrimitiveStyle};

    fn frame(width: u16, height: u16, byte_swap: bool) -> FrameBuffer<Vec<u8>> {
        let buffer = vec![0u8; width as usize * height as usize * 2];
        FrameBuffer::new(buffer, width, height, byte_swap).unwrap()
    }

    fn lit(fb: &FrameBuffer<Vec<u8>>, color: u16) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        for y in 0..i32::from(fb.height()) {
            for x in 0..i32::from(fb.width()) {
                if fb.get_pixel(x, y) == Some(color) {
                    points.push((x, y));
                }
            }
        }
        points
    }

    #[test]
    fn test_byte_swap_on_write_and_read() {
        let mut fb = frame(2, 1, true);
        fb.pixel(0, 0, GREEN);
        assert_eq!(&fb.as_bytes()[..2], &[0x07, 0xE0]);
        assert_eq!(fb.get_pixel(0, 0), Some(GREEN));

        let mut fb = frame(2, 1, false);
        fb.pixel(0, 0, GREEN);
        assert_eq!(&fb.as_bytes()[..2], &[0xE0, 0x07]);
        assert_eq!(fb.get_pixel(0, 0), Some(GREEN));
    }

    #[test]
    fn test_fill_and_get_pixel_bounds() {
        let mut fb = frame(3, 2, true);
        fb.fill(BLUE);
        assert_eq!(lit(&fb, BLUE).len(), 6);
        assert_eq!(fb.get_pixel(3, 0), None);
        assert_eq!(fb.get_pixel(0, -1), None);
    }

    #[test]
    fn test_hline_and_vline() {
        let mut fb = frame(5, 5, true);
        fb.hline(1, 2, 3, RED);
        fb.vline(4, 0, 2, WHITE);
        assert_eq!(lit(&fb, RED), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(lit(&fb, WHITE), vec![(4, 0), (4, 1)]);
    }

    #[test]
    fn test_line_includes_both_ends() {
        let mut fb = frame(5, 5, true);
        fb.line(0, 0, 4, 4, RED);
        assert_eq!(lit(&fb, RED), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_rect_outline_and_fill() {
        let mut fb = frame(6, 6, true);
        fb.rect(1, 1, 4, 3, WHITE, false);
        let outline = lit(&fb, WHITE);
        assert_eq!(outline.len(), 10);
        assert!(!outline.contains(&(2, 2)));

        fb.rect(1, 1, 4, 3, RED, true);
        assert_eq!(lit(&fb, RED).len(), 12);
        assert!(lit(&fb, WHITE).is_empty());
    }

    #[test]
    fn test_ellipse_outline_extremes() {
        let mut fb = frame(21, 21, true);
        fb.ellipse(10, 10, 6, 4, WHITE, false, QUADRANT_ALL);
        let points = lit(&fb, WHITE);
        for expected in [(16, 10), (4, 10), (10, 6), (10, 14)] {
            assert!(points.contains(&expected), "missing {expected:?}");
        }
        assert!(!points.contains(&(10, 10)));
    }

    #[test]
    fn test_filled_ellipse_is_symmetric() {
        let mut fb = frame(21, 21, false);
        fb.ellipse(10, 10, 5, 5, GREEN, true, QUADRANT_ALL);
        let points = lit(&fb, GREEN);
        assert!(points.contains(&(10, 10)));
        for &(x, y) in &points {
            assert!(points.contains(&(20 - x, y)));
            assert!(points.contains(&(x, 20 - y)));
        }
    }

    #[test]
    fn test_ellipse_quadrant_mask() {
        let mut fb = frame(21, 21, true);
        fb.ellipse(10, 10, 5, 5, RED, true, QUADRANT_1);
        let points = lit(&fb, RED);
        assert!(!points.is_empty());
        assert!(points.iter().all(|&(x, y)| x >= 10 && y <= 10));
    }

    #[test]
    fn test_ellipse_with_zero_radii_is_a_masked_point() {
        let mut fb = frame(9, 9, true);
        fb.ellipse(4, 4, 0, 0, WHITE, false, 0);
        assert!(lit(&fb, WHITE).is_empty());

        fb.ellipse(4, 4, 0, 0, WHITE, true, QUADRANT_3);
        assert_eq!(lit(&fb, WHITE), vec![(4, 4)]);
    }

    #[test]
    fn test_flat_ellipse_plots_centre_and_ends() {
        let mut fb = frame(17, 17, true);
        fb.ellipse(8, 8, 4, 0, WHITE, false, QUADRANT_ALL);
        assert_eq!(lit(&fb, WHITE), vec![(4, 8), (8, 8), (12, 8)]);

        let mut fb = frame(17, 17, true);
        fb.ellipse(8, 8, 0, 3, WHITE, false, QUADRANT_ALL);
        assert_eq!(lit(&fb, WHITE), vec![(8, 5), (8, 8), (8, 11)]);
    }

    #[test]
    fn test_flat_ellipse_respects_quadrant_mask() {
        let mut fb = frame(17, 17, true);
        fb.ellipse(8, 8, 4, 0, RED, true, QUADRANT_1);
        assert_eq!(lit(&fb, RED), vec![(8, 8), (9, 8), (10, 8), (11, 8), (12, 8)]);

        fb.ellipse(8, 8, 4, 0, GREEN, true, QUADRANT_2);
        assert_eq!(lit(&fb, GREEN), vec![(4, 8), (5, 8), (6, 8), (7, 8), (8, 8)]);
    }

    #[test]
    fn test_poly_fill_with_far_off_frame_vertices() {
        let mut fb = frame(16, 16, true);
        let triangle = [
            Point::new(0, 0),
            Point::new(20_000, 20_000),
            Point::new(0, 20_000),
        ];
        fb.poly(0, 0, &triangle, WHITE, true);

        let points = lit(&fb, WHITE);
        assert_eq!(points.len(), 16 * 17 / 2);
        assert!(points.iter().all(|&(x, y)| x <= y));
    }

    #[test]
    fn test_poly_at_extreme_offsets_draws_nothing() {
        let mut fb = frame(16, 16, true);
        let square = [
            Point::new(-10, -10),
            Point::new(10, -10),
            Point::new(10, 10),
            Point::new(-10, 10),
        ];
        fb.poly(i32::MAX, i32::MIN, &square, WHITE, true);
        fb.poly(i32::MIN, i32::MAX, &square, WHITE, true);
        assert!(lit(&fb, WHITE).is_empty());
    }

    #[test]
    fn test_huge_rect_and_ellipse_clip_without_overflow() {
        let mut fb = frame(16, 16, true);
        fb.rect(10, 10, i32::MAX, i32::MAX, WHITE, false);
        let outline = lit(&fb, WHITE);
        assert_eq!(outline.len(), 11);
        assert!(outline.iter().all(|&(x, y)| x == 10 || y == 10));

        fb.ellipse(i32::MAX, i32::MIN, 5, 5, RED, true, QUADRANT_ALL);
        fb.ellipse(i32::MIN, i32::MAX, 5, 5, RED, false, QUADRANT_ALL);
        assert!(lit(&fb, RED).is_empty());
    }

    #[test]
    fn test_poly_outline_closes() {
        let mut fb = frame(10, 10, true);
        let triangle = [Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)];
        fb.poly(1, 1, &triangle, WHITE, false);
        let points = lit(&fb, WHITE);
        for expected in [(1, 1), (5, 1), (1, 5), (3, 3), (1, 3)] {
            assert!(points.contains(&expected), "missing {expected:?}");
        }
        assert!(!points.contains(&(2, 2)));
    }

    #[test]
    fn test_poly_fill_square() {
        let mut fb = frame(8, 8, true);
        let square = [
            Point::new(0, 0),
            Point::new(3, 0),
            Point::new(3, 3),
            Point::new(0, 3),
        ];
        fb.poly(2, 2, &square, RED, true);
        let points = lit(&fb, RED);
        assert_eq!(points.len(), 16);
        assert!(points.iter().all(|&(x, y)| (2..=5).contains(&x) && (2..=5).contains(&y)));
    }

    #[test]
    fn test_poly_without_vertices_draws_nothing() {
        let mut fb = frame(4, 4, true);
        fb.poly(0, 0, &[], RED, true);
        assert!(lit(&fb, RED).is_empty());
    }

    #[test]
    fn test_text_draws_inside_glyph_box() {
        let mut fb = frame(32, 16, true);
        fb.text("A", 0, 0, WHITE);
        let points = lit(&fb, WHITE);
        assert!(!points.is_empty());
        assert!(points.iter().all(|&(x, y)| x < 8 && y < 13));
    }

    #[test]
    fn test_draw_target_applies_byte_swap() {
        let mut fb = frame(20, 20, true);
        Circle::new(Point::new(5, 5), 8)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::from(RawU16::new(RED))))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.get_pixel(9, 9), Some(RED));
        assert_eq!(fb.get_pixel(0, 0), Some(BLACK));

        fb.clear(Rgb565::from(RawU16::new(BLUE))).unwrap();
        assert_eq!(lit(&fb, BLUE).len(), 400);
    }
}
