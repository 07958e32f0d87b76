//! RGB565 color helpers
//!
//! The ST7789 is driven in 16 bits per pixel mode: 5 bits red, 6 bits green,
//! 5 bits blue, packed into one word.
//!
//! | Bits  | 15..11 | 10..5 | 4..0 |
//! |-------|--------|-------|------|
//! | Field | red    | green | blue |
//!
//! Some panels expect the two bytes of each word in the opposite order from
//! how they are laid out in the framebuffer; [`swap_bytes`] corrects that.
//!
//! ## Example
//!
//! ```
//! use st7789_fb::color::{self, color565, swap_bytes};
//!
//! assert_eq!(color565(255, 0, 0), color::RED);
//! assert_eq!(color565(0, 255, 0), color::GREEN);
//! assert_eq!(swap_bytes(0x07E0), 0xE007);
//! ```

use crate::command::MADCTL_BGR;

/// Black
pub const BLACK: u16 = 0x0000;
/// Blue
pub const BLUE: u16 = 0x001F;
/// Red
pub const RED: u16 = 0xF800;
/// Green
pub const GREEN: u16 = 0x07E0;
/// Cyan
pub const CYAN: u16 = 0x07FF;
/// Magenta
pub const MAGENTA: u16 = 0xF81F;
/// Yellow
pub const YELLOW: u16 = 0xFFE0;
/// White
pub const WHITE: u16 = 0xFFFF;

/// Pack 8-bit red, green and blue channels into an RGB565 word
///
/// The low bits of each channel are truncated, not rounded.
pub const fn color565(red: u8, green: u8, blue: u8) -> u16 {
    ((red as u16 & 0xF8) << 8) | ((green as u16 & 0xFC) << 3) | (blue as u16 >> 3)
}

/// Expand an RGB565 word back to 8-bit channels
///
/// Dropped low bits come back as zero.
pub const fn unpack565(color: u16) -> (u8, u8, u8) {
    let red = ((color >> 8) & 0xF8) as u8;
    let green = ((color >> 3) & 0xFC) as u8;
    let blue = ((color << 3) & 0xF8) as u8;
    (red, green, blue)
}

/// Exchange the high and low bytes of a color word
pub const fn swap_bytes(color: u16) -> u16 {
    color.swap_bytes()
}

/// Order of the color filters on the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red, green, blue
    Rgb,
    /// Blue, green, red
    #[default]
    Bgr,
}

impl ColorOrder {
    /// Apply this color order to a MADCTL value
    ///
    /// Sets the BGR bit for [`ColorOrder::Bgr`] and clears it for
    /// [`ColorOrder::Rgb`]; the scan-direction bits are kept.
    pub fn apply(self, madctl: u8) -> u8 {
        match self {
            Self::Rgb => madctl & !MADCTL_BGR,
            Self::Bgr => madctl | MADCTL_BGR,
        }
    }
}
