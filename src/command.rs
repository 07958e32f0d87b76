//! ST7789 command definitions
//!
//! This module defines the command bytes used to control the ST7789 LCD
//! controller, the MADCTL flag bits, and the power-on initialization sequence.
//! Commands are sent with the DC line low and their parameters with DC high.
//!
//! ## Command Structure
//!
//! Every logical write follows the pattern:
//! 1. Assert CS (Chip Select), if wired
//! 2. Set DC low (command mode)
//! 3. Send command byte
//! 4. Set DC high (data mode)
//! 5. Send parameter bytes (if any)
//! 6. Deassert CS
//!
//! ## Example
//!
//! ```
//! use st7789_fb::command;
//!
//! // Window covering columns 40..=279
//! assert_eq!(command::address_range(40, 279), [0x00, 0x28, 0x01, 0x17]);
//! assert_eq!(command::INIT_SEQUENCE.len(), 17);
//! ```

// System control commands

/// Software reset (0x01)
///
/// Resets registers to their defaults. Wait 150ms before the next command.
pub const SWRESET: u8 = 0x01;

/// Sleep in (0x10)
///
/// Enters minimum power consumption mode. Panel RAM is retained.
pub const SLPIN: u8 = 0x10;

/// Sleep out (0x11)
///
/// Leaves sleep mode. Wait 120ms before sending SLPIN again.
pub const SLPOUT: u8 = 0x11;

/// Normal display mode on (0x13)
pub const NORON: u8 = 0x13;

/// Display inversion off (0x20)
pub const INVOFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVON: u8 = 0x21;

/// Display off (0x28)
///
/// Stops scanning out frame memory; RAM content is kept.
pub const DISPOFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPON: u8 = 0x29;

// Addressing and memory commands

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const CASET: u8 = 0x2A;

/// Row address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const RASET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Pixel data that follows fills the current addressing window.
pub const RAMWR: u8 = 0x2C;

/// Vertical scrolling definition (0x33)
///
/// Requires 6 bytes: top fixed area, scroll area and bottom fixed area,
/// each as a big-endian u16.
pub const VSCRDEF: u8 = 0x33;

/// Memory data access control (0x36)
///
/// Requires 1 byte of `MADCTL_*` flags.
pub const MADCTL: u8 = 0x36;

/// Vertical scroll start address (0x37)
///
/// Requires 2 bytes: big-endian line number.
pub const VSCSAD: u8 = 0x37;

/// Interface pixel format (0x3A)
///
/// Requires 1 byte: 0x55 = 16 bits per pixel (RGB565)
pub const COLMOD: u8 = 0x3A;

/// RAM control (0xB0)
pub const RAMCTL: u8 = 0xB0;

// MADCTL bits

/// Page (row) address order, bottom to top
pub const MADCTL_MY: u8 = 0x80;
/// Column address order, right to left
pub const MADCTL_MX: u8 = 0x40;
/// Row/column exchange
pub const MADCTL_MV: u8 = 0x20;
/// Vertical refresh order
pub const MADCTL_ML: u8 = 0x10;
/// BGR color filter panel order
pub const MADCTL_BGR: u8 = 0x08;
/// Horizontal refresh order
pub const MADCTL_MH: u8 = 0x04;
/// RGB color filter panel order
pub const MADCTL_RGB: u8 = 0x00;

/// One step of the power-on initialization sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitCommand {
    /// Command byte
    pub command: u8,
    /// Parameter bytes sent after the command
    pub data: &'static [u8],
    /// Delay after the command, in milliseconds
    pub delay_ms: u32,
}

impl InitCommand {
    const fn new(command: u8, data: &'static [u8], delay_ms: u32) -> Self {
        Self {
            command,
            data,
            delay_ms,
        }
    }
}

/// Power-on initialization sequence
///
/// Panels are not reliably initialized by a single pass, so the driver sends
/// this table twice.
pub const INIT_SEQUENCE: [InitCommand; 17] = [
    InitCommand::new(SLPOUT, &[0x00], 120),
    InitCommand::new(NORON, &[0x00], 0),
    // Display function control
    InitCommand::new(0xB6, &[0x0A, 0x82], 0),
    // 16 bits per pixel
    InitCommand::new(COLMOD, &[0x55], 10),
    // Porch control
    InitCommand::new(0xB2, &[0x0C, 0x0C, 0x00, 0x33, 0x33], 0),
    // Gate control
    InitCommand::new(0xB7, &[0x35], 0),
    // VCOMS
    InitCommand::new(0xBB, &[0x28], 0),
    // Power control 1..4
    InitCommand::new(0xC0, &[0x0C], 0),
    InitCommand::new(0xC2, &[0x01, 0xFF], 0),
    InitCommand::new(0xC3, &[0x10], 0),
    InitCommand::new(0xC4, &[0x20], 0),
    // VCOM control 1
    InitCommand::new(0xC6, &[0x0F], 0),
    // Power control A
    InitCommand::new(0xD0, &[0xA4, 0xA1], 0),
    // Positive gamma
    InitCommand::new(
        0xE0,
        &[
            0xD0, 0x00, 0x02, 0x07, 0x0A, 0x28, 0x32, 0x44, 0x42, 0x06, 0x0E, 0x12, 0x14, 0x17,
        ],
        0,
    ),
    // Negative gamma
    InitCommand::new(
        0xE1,
        &[
            0xD0, 0x00, 0x02, 0x07, 0x0A, 0x28, 0x31, 0x54, 0x47, 0x0E, 0x1C, 0x17, 0x1B, 0x1E,
        ],
        0,
    ),
    InitCommand::new(INVON, &[0x00], 0),
    InitCommand::new(DISPON, &[0x00], 120),
];

/// Encode a CASET/RASET parameter block
///
/// Both addresses are inclusive and sent big-endian.
pub fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_range_is_big_endian() {
        assert_eq!(address_range(0, 239), [0x00, 0x00, 0x00, 0xEF]);
        assert_eq!(address_range(0x0102, 0x0304), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_init_sequence_bookends() {
        let first = INIT_SEQUENCE[0];
        assert_eq!(first.command, SLPOUT);
        assert_eq!(first.delay_ms, 120);

        let last = INIT_SEQUENCE[INIT_SEQUENCE.len() - 1];
        assert_eq!(last.command, DISPON);
        assert_eq!(last.delay_ms, 120);
        assert_eq!(INIT_SEQUENCE[15].command, INVON);
    }

    #[test]
    fn test_init_sequence_sets_rgb565() {
        let colmod = INIT_SEQUENCE
            .iter()
            .find(|cmd| cmd.command == COLMOD)
            .map(|cmd| cmd.data);
        assert_eq!(colmod, Some(&[0x55u8][..]));
    }

    #[test]
    fn test_gamma_tables_are_fourteen_bytes() {
        for cmd in INIT_SEQUENCE.iter().filter(|c| c.command == 0xE0 || c.command == 0xE1) {
            assert_eq!(cmd.data.len(), 14);
        }
    }
}
