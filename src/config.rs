//! Display configuration types and builder

pub use crate::error::BuilderError;
use crate::color::ColorOrder;
use crate::panel::{PanelGeometry, find_panel};
use crate::rotation::Rotation;

/// Display configuration
///
/// This struct holds the panel selection and the settings applied at
/// initialization. Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel geometry, looked up from the physical dimensions
    pub panel: &'static PanelGeometry,
    /// Rotation applied at initialization
    pub rotation: Rotation,
    /// Color filter order of the panel
    pub color_order: ColorOrder,
    /// Swap the bytes of every color word written to the framebuffer
    pub byte_swap: bool,
    /// Backlight brightness applied at initialization (0.0..=1.0)
    pub brightness: f32,
}

impl Config {
    /// Framebuffer dimensions `(width, height)` for the initial rotation
    ///
    /// The framebuffer keeps this shape for the lifetime of the display.
    pub fn framebuffer_dimensions(&self) -> (u16, u16) {
        if self.rotation.is_landscape() {
            (self.panel.height, self.panel.width)
        } else {
            (self.panel.width, self.panel.height)
        }
    }

    /// Required framebuffer size in bytes
    pub fn buffer_size(&self) -> usize {
        self.panel.buffer_size()
    }

    /// Allocate a zeroed framebuffer of the required size
    #[cfg(feature = "alloc")]
    pub fn allocate_buffer(&self) -> alloc::vec::Vec<u8> {
        alloc::vec![0u8; self.buffer_size()]
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use st7789_fb::{Builder, ColorOrder, Rotation};
///
/// let config = match Builder::new()
///     .dimensions(135, 240)
///     .rotation(Rotation::Rotate270)
///     .color_order(ColorOrder::Bgr)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Physical panel dimensions (required)
    dimensions: Option<(u16, u16)>,
    /// Display rotation
    rotation: Rotation,
    /// Color filter order
    color_order: ColorOrder,
    /// Byte-swap color words
    byte_swap: bool,
    /// Initial backlight brightness
    brightness: f32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            color_order: ColorOrder::Bgr,
            // Most modules expect the opposite byte order from the raster layout
            byte_swap: true,
            brightness: 1.0,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set physical panel dimensions in portrait orientation (required)
    pub fn dimensions(mut self, width: u16, height: u16) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the panel color filter order
    pub fn color_order(mut self, color_order: ColorOrder) -> Self {
        self.color_order = color_order;
        self
    }

    /// Set whether color words are byte-swapped in the framebuffer
    pub fn byte_swap(mut self, value: bool) -> Self {
        self.byte_swap = value;
        self
    }

    /// Set the backlight brightness applied at initialization
    pub fn brightness(mut self, value: f32) -> Self {
        self.brightness = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// and `BuilderError::UnsupportedPanel` if no known panel has them.
    pub fn build(self) -> Result<Config, BuilderError> {
        let (width, height) = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let panel =
            find_panel(width, height).ok_or(BuilderError::UnsupportedPanel { width, height })?;
        Ok(Config {
            panel,
            rotation: self.rotation,
            color_order: self.color_order,
            byte_swap: self.byte_swap,
            brightness: self.brightness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::SUPPORTED_PANELS;

    #[test]
    fn test_build_selects_each_supported_panel() {
        for panel in &SUPPORTED_PANELS {
            let config = Builder::new()
                .dimensions(panel.width, panel.height)
                .build()
                .unwrap();
            assert_eq!(config.panel, panel);
        }
    }

    #[test]
    fn test_build_rejects_unsupported_panel() {
        for (width, height) in [(320, 240), (100, 100), (135, 135), (0, 0)] {
            let result = Builder::new().dimensions(width, height).build();
            assert!(matches!(
                result,
                Err(BuilderError::UnsupportedPanel { width: w, height: h })
                    if w == width && h == height
            ));
        }
    }

    #[test]
    fn test_defaults() {
        let config = Builder::new().dimensions(240, 320).build().unwrap();
        assert_eq!(config.rotation, Rotation::Rotate0);
        assert_eq!(config.color_order, ColorOrder::Bgr);
        assert!(config.byte_swap);
        assert_eq!(config.brightness, 1.0);
    }

    #[test]
    fn test_framebuffer_dimensions_follow_initial_rotation() {
        let portrait = Builder::new().dimensions(135, 240).build().unwrap();
        assert_eq!(portrait.framebuffer_dimensions(), (135, 240));

        let landscape = Builder::new()
            .dimensions(135, 240)
            .rotation(Rotation::Rotate270)
            .build()
            .unwrap();
        assert_eq!(landscape.framebuffer_dimensions(), (240, 135));
        assert_eq!(landscape.buffer_size(), 240 * 135 * 2);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_allocate_buffer() {
        let config = Builder::new().dimensions(128, 128).build().unwrap();
        assert_eq!(config.allocate_buffer().len(), 128 * 128 * 2);
    }
}
