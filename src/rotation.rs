//! Display rotation and per-rotation addressing parameters
//!
//! The ST7789 rotates the image in hardware: the MADCTL register selects the
//! scan direction, and the addressing window is moved to the part of the
//! controller RAM that is actually wired to glass. Each supported panel
//! carries a table of four [`RotationEntry`] records, one per quarter turn.
//!
//! ## Rotation Modes
//!
//! - **Rotate0**: Portrait (native orientation)
//! - **Rotate90**: Landscape
//! - **Rotate180**: Inverted portrait
//! - **Rotate270**: Inverted landscape
//!
//! ## Example
//!
//! ```
//! use st7789_fb::Rotation;
//!
//! assert_eq!(Rotation::from_index(3), Rotation::Rotate270);
//! assert_eq!(Rotation::from_index(5), Rotation::Rotate90);
//! assert!(Rotation::Rotate90.is_landscape());
//! ```

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Portrait
    #[default]
    Rotate0,
    /// Landscape
    Rotate90,
    /// Inverted portrait
    Rotate180,
    /// Inverted landscape
    Rotate270,
}

impl Rotation {
    /// Rotation from a quarter-turn index; wraps modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::Rotate0,
            1 => Self::Rotate90,
            2 => Self::Rotate180,
            _ => Self::Rotate270,
        }
    }

    /// Quarter-turn index (0..=3)
    pub fn index(self) -> usize {
        match self {
            Self::Rotate0 => 0,
            Self::Rotate90 => 1,
            Self::Rotate180 => 2,
            Self::Rotate270 => 3,
        }
    }

    /// Whether the long side of a portrait panel runs horizontally
    pub fn is_landscape(self) -> bool {
        self.index() % 2 == 1
    }
}

/// Addressing parameters for one rotation of a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationEntry {
    /// MADCTL scan-direction flags (color-order bit is applied separately)
    pub madctl: u8,
    /// Logical width in this orientation
    pub width: u16,
    /// Logical height in this orientation
    pub height: u16,
    /// First controller RAM column wired to the panel
    pub x_start: u16,
    /// First controller RAM row wired to the panel
    pub y_start: u16,
}

impl RotationEntry {
    pub(crate) const fn new(
        madctl: u8,
        width: u16,
        height: u16,
        x_start: u16,
        y_start: u16,
    ) -> Self {
        Self {
            madctl,
            width,
            height,
            x_start,
            y_start,
        }
    }

    /// Inclusive column range of the addressing window
    pub fn columns(&self) -> (u16, u16) {
        (self.x_start, self.x_start + self.width - 1)
    }

    /// Inclusive row range of the addressing window
    pub fn rows(&self) -> (u16, u16) {
        (self.y_start, self.y_start + self.height - 1)
    }
}
