//! Supported panel table
//!
//! The ST7789 drives up to 240x320 pixels, but most modules only wire part
//! of the controller RAM to glass. Each [`PanelGeometry`] records which part,
//! for each of the four rotations.

use crate::rotation::{Rotation, RotationEntry};

/// Physical panel resolution and its rotation table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Physical width in pixels (portrait)
    pub width: u16,
    /// Physical height in pixels (portrait)
    pub height: u16,
    /// Addressing parameters, indexed by [`Rotation::index`]
    pub rotations: [RotationEntry; 4],
}

impl PanelGeometry {
    /// Addressing parameters for a rotation
    pub fn entry(&self, rotation: Rotation) -> &RotationEntry {
        &self.rotations[rotation.index()]
    }

    /// Whether width and height are equal
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Framebuffer size in bytes (RGB565, two bytes per pixel)
    pub fn buffer_size(&self) -> usize {
        self.width as usize * self.height as usize * 2
    }
}

const fn entry(madctl: u8, width: u16, height: u16, x_start: u16, y_start: u16) -> RotationEntry {
    RotationEntry::new(madctl, width, height, x_start, y_start)
}

/// 240x320 panel
pub const PANEL_240X320: PanelGeometry = PanelGeometry {
    width: 240,
    height: 320,
    rotations: [
        entry(0x00, 240, 320, 0, 0),
        entry(0x60, 320, 240, 0, 0),
        entry(0xC0, 240, 320, 0, 0),
        entry(0xA0, 320, 240, 0, 0),
    ],
};

/// 170x320 panel
pub const PANEL_170X320: PanelGeometry = PanelGeometry {
    width: 170,
    height: 320,
    rotations: [
        entry(0x00, 170, 320, 35, 0),
        entry(0x60, 320, 170, 0, 35),
        entry(0xC0, 170, 320, 35, 0),
        entry(0xA0, 320, 170, 0, 35),
    ],
};

/// 240x240 panel
pub const PANEL_240X240: PanelGeometry = PanelGeometry {
    width: 240,
    height: 240,
    rotations: [
        entry(0x00, 240, 240, 0, 0),
        entry(0x60, 240, 240, 0, 0),
        entry(0xC0, 240, 240, 0, 80),
        entry(0xA0, 240, 240, 80, 0),
    ],
};

/// 135x240 panel
pub const PANEL_135X240: PanelGeometry = PanelGeometry {
    width: 135,
    height: 240,
    rotations: [
        entry(0x00, 135, 240, 52, 40),
        entry(0x60, 240, 135, 40, 53),
        entry(0xC0, 135, 240, 53, 40),
        entry(0xA0, 240, 135, 40, 52),
    ],
};

/// 128x128 panel
pub const PANEL_128X128: PanelGeometry = PanelGeometry {
    width: 128,
    height: 128,
    rotations: [
        entry(0x00, 128, 128, 2, 1),
        entry(0x60, 128, 128, 1, 2),
        entry(0xC0, 128, 128, 2, 1),
        entry(0xA0, 128, 128, 1, 2),
    ],
};

/// Every panel the driver knows how to address
pub static SUPPORTED_PANELS: [PanelGeometry; 5] = [
    PANEL_240X320,
    PANEL_170X320,
    PANEL_240X240,
    PANEL_135X240,
    PANEL_128X128,
];

/// Look up a panel by physical resolution
pub fn find_panel(width: u16, height: u16) -> Option<&'static PanelGeometry> {
    SUPPORTED_PANELS
        .iter()
        .find(|panel| panel.width == width && panel.height == height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_size_matches_exactly_one_panel() {
        for panel in &SUPPORTED_PANELS {
            let matches = SUPPORTED_PANELS
                .iter()
                .filter(|p| p.width == panel.width && p.height == panel.height)
                .count();
            assert_eq!(matches, 1);
            assert_eq!(find_panel(panel.width, panel.height), Some(panel));
        }
    }

    #[test]
    fn test_unsupported_sizes() {
        assert!(find_panel(320, 240).is_none());
        assert!(find_panel(0, 0).is_none());
        assert!(find_panel(135, 241).is_none());
    }

    #[test]
    fn test_rotation_tables_match_orientation() {
        for panel in &SUPPORTED_PANELS {
            for index in 0..4u8 {
                let rotation = Rotation::from_index(index);
                let entry = panel.entry(rotation);
                if rotation.is_landscape() {
                    assert_eq!((entry.width, entry.height), (panel.height, panel.width));
                } else {
                    assert_eq!((entry.width, entry.height), (panel.width, panel.height));
                }
            }
        }
    }

    #[test]
    fn test_windows_fit_controller_ram() {
        // ST7789 frame memory is 240x320
        for panel in &SUPPORTED_PANELS {
            for entry in &panel.rotations {
                let (_, col_end) = entry.columns();
                let (_, row_end) = entry.rows();
                if entry.madctl & crate::command::MADCTL_MV != 0 {
                    assert!(col_end < 320 && row_end < 240);
                } else {
                    assert!(col_end < 240 && row_end < 320);
                }
            }
        }
    }

    #[test]
    fn test_buffer_size() {
        assert_eq!(PANEL_135X240.buffer_size(), 135 * 240 * 2);
        assert!(!PANEL_135X240.is_square());
        assert!(PANEL_240X240.is_square());
    }
}
