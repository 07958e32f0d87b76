//! ST7789 LCD Framebuffer Driver
//!
//! A driver for the ST7789 TFT controller that keeps the whole frame in
//! memory and sends it to the panel in one write.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - SPI and 8080 parallel bus bindings
//! - `embedded-graphics` integration
//! - Panel table for 240x320, 170x320, 240x240, 135x240 and 128x128 modules
//! - Rotation support
//! - PWM or on/off backlight
//! - Optional color byte swap for modules wired with the opposite word order
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use st7789_fb::backlight::PinBacklight;
//! use st7789_fb::color::{BLACK, WHITE, color565};
//! use st7789_fb::{Builder, Display, Rotation, SpiInterface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let cs = MockPin;
//! # let bl = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc).with_reset(rst).with_cs(cs);
//! let config = match Builder::new()
//!     .dimensions(240, 320)
//!     .rotation(Rotation::Rotate90)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let buffer = config.allocate_buffer();
//!
//! let mut display = match Display::init_with_backlight(
//!     interface,
//!     config,
//!     buffer,
//!     PinBacklight::new(bl),
//!     &mut delay,
//! ) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//!
//! let fb = display.framebuffer_mut();
//! fb.fill(BLACK);
//! fb.text("Hello", 8, 8, WHITE);
//! fb.ellipse(160, 120, 40, 30, color565(255, 128, 0), true, 0x0F);
//! let _ = display.present();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Backlight control
pub mod backlight;
/// RGB565 color helpers
pub mod color;
/// ST7789 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Drawing primitives over the in-memory frame
pub mod framebuffer;
/// Hardware interface abstraction
pub mod interface;
/// Supported panels and their rotation tables
pub mod panel;
/// 8080 parallel bus binding
pub mod parallel;
/// Generic RGB565 pixel buffer
pub mod raster;
/// Rotation and addressing windows
pub mod rotation;

#[cfg(test)]
mod mock;

pub use backlight::{Backlight, BacklightMode, NoBacklight, PinBacklight, PwmBacklight};
pub use color::{ColorOrder, color565};
pub use config::{Builder, Config};
pub use display::Display;
pub use error::{BacklightCapabilityError, BuilderError, Error};
pub use framebuffer::FrameBuffer;
pub use interface::{DisplayInterface, InterfaceError, NoPin, SpiInterface};
pub use panel::{PanelGeometry, SUPPORTED_PANELS};
pub use parallel::{Gpio8Bus, ParallelBus, ParallelInterface};
pub use rotation::{Rotation, RotationEntry};
