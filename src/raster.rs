//! Generic RGB565 raster
//!
//! [`Raster`] is a plain 16-bit pixel buffer over caller-supplied storage.
//! Words are stored little-endian, row-major, with no padding. It knows
//! nothing about the panel; [`FrameBuffer`](crate::framebuffer::FrameBuffer)
//! layers color byte order on top of it.

use core::convert::Infallible;
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

/// Row-major RGB565 pixel buffer
pub struct Raster<B> {
    buffer: B,
    width: u16,
    height: u16,
}

impl<B> Raster<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Bytes needed for a `width` x `height` raster
    pub const fn required_size(width: u16, height: u16) -> usize {
        width as usize * height as usize * 2
    }

    /// Wrap `buffer` as a `width` x `height` raster
    ///
    /// Returns `None` if the buffer is smaller than
    /// [`required_size`](Self::required_size). Extra bytes are ignored.
    pub fn new(buffer: B, width: u16, height: u16) -> Option<Self> {
        if buffer.as_ref().len() < Self::required_size(width, height) {
            return None;
        }
        Some(Self {
            buffer,
            width,
            height,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 2)
    }

    /// Store a raw word; coordinates outside the raster are ignored
    pub fn set_raw(&mut self, x: i32, y: i32, word: u16) {
        if let Some(offset) = self.offset(x, y) {
            self.buffer.as_mut()[offset..offset + 2].copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Read a raw word, `None` outside the raster
    pub fn raw(&self, x: i32, y: i32) -> Option<u16> {
        let offset = self.offset(x, y)?;
        let bytes = self.buffer.as_ref();
        Some(u16::from_le_bytes([bytes[offset], bytes[offset + 1]]))
    }

    /// Set every pixel to `word`
    pub fn fill_raw(&mut self, word: u16) {
        let len = Self::required_size(self.width, self.height);
        let bytes = word.to_le_bytes();
        for pair in self.buffer.as_mut()[..len].chunks_exact_mut(2) {
            pair.copy_from_slice(&bytes);
        }
    }

    /// Fill a rectangle, clipped to the raster
    ///
    /// Non-positive widths or heights draw nothing.
    pub fn fill_rect_raw(&mut self, x: i32, y: i32, w: i32, h: i32, word: u16) {
        if w < 1 || h < 1 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(i32::from(self.width));
        let y1 = y.saturating_add(h).min(i32::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize * 2;
        let bytes = word.to_le_bytes();
        let buffer = self.buffer.as_mut();
        for row in y0 as usize..y1 as usize {
            let start = row * stride + x0 as usize * 2;
            let end = row * stride + x1 as usize * 2;
            for pair in buffer[start..end].chunks_exact_mut(2) {
                pair.copy_from_slice(&bytes);
            }
        }
    }

    /// Pixel bytes, exactly `width * height * 2` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..Self::required_size(self.width, self.height)]
    }

    /// Give the storage back
    pub fn release(self) -> B {
        self.buffer
    }
}

impl<B> DrawTarget for Raster<B>
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
            self.set_raw(x, y, RawU16::from(color).into_inner());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = i32::try_from(area.size.width).unwrap_or(i32::MAX);
        let h = i32::try_from(area.size.height).unwrap_or(i32::MAX);
        self.fill_rect_raw(
            area.top_left.x,
            area.top_left.y,
            w,
            h,
            RawU16::from(color).into_inner(),
        );
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_raw(RawU16::from(color).into_inner());
        Ok(())
    }
}

impl<B> OriginDimensions for Raster<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics_core::pixelcolor::RgbColor;

    #[test]
    fn test_new_rejects_short_buffer() {
        assert!(Raster::new([0u8; 4 * 3 * 2 - 1], 4, 3).is_none());
        assert!(Raster::new([0u8; 4 * 3 * 2], 4, 3).is_some());
    }

    #[test]
    fn test_words_are_little_endian() {
        let mut raster = Raster::new([0u8; 8], 2, 2).unwrap();
        raster.set_raw(1, 0, 0x1234);
        assert_eq!(raster.as_bytes(), &[0, 0, 0x34, 0x12, 0, 0, 0, 0]);
        assert_eq!(raster.raw(1, 0), Some(0x1234));
    }

    #[test]
    fn test_out_of_bounds_access_is_ignored() {
        let mut raster = Raster::new([0u8; 8], 2, 2).unwrap();
        raster.set_raw(-1, 0, 0xFFFF);
        raster.set_raw(2, 0, 0xFFFF);
        raster.set_raw(0, 2, 0xFFFF);
        assert!(raster.as_bytes().iter().all(|b| *b == 0));
        assert_eq!(raster.raw(0, -1), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut raster = Raster::new([0u8; 4 * 4 * 2], 4, 4).unwrap();
        raster.fill_rect_raw(-2, 2, 4, 10, 0xAAAA);
        for y in 0..4 {
            for x in 0..4 {
                let expected = if x < 2 && y >= 2 { 0xAAAA } else { 0 };
                assert_eq!(raster.raw(x, y), Some(expected), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_fill_rect_ignores_empty_sizes() {
        let mut raster = Raster::new([0u8; 8], 2, 2).unwrap();
        raster.fill_rect_raw(0, 0, 0, 2, 0xFFFF);
        raster.fill_rect_raw(0, 0, 2, -1, 0xFFFF);
        assert!(raster.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_as_bytes_excludes_slack() {
        let raster = Raster::new([0u8; 20], 2, 2).unwrap();
        assert_eq!(raster.as_bytes().len(), 8);
    }

    #[test]
    fn test_draw_target_stores_raw_color() {
        let mut raster = Raster::new([0u8; 8], 2, 2).unwrap();
        raster.clear(Rgb565::RED).unwrap();
        assert_eq!(raster.raw(1, 1), Some(0xF800));
        assert_eq!(raster.size(), Size::new(2, 2));
    }
}
