//! Core display operations
//!
//! [`Display`] owns the transport, the frame and the backlight. It is only
//! obtainable through [`Display::init`] or [`Display::init_with_backlight`],
//! so every method runs against an initialized controller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use st7789_fb::color::{BLACK, GREEN};
//! use st7789_fb::{Builder, Display, Rotation, SpiInterface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(MockSpi, MockPin).with_reset(MockPin);
//! let config = match Builder::new()
//!     .dimensions(135, 240)
//!     .rotation(Rotation::Rotate270)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let buffer = [0u8; 135 * 240 * 2];
//!
//! let mut display = match Display::init(interface, config, buffer, &mut delay) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! display.framebuffer_mut().fill(BLACK);
//! display.framebuffer_mut().fill_rect(30, 30, 180, 75, GREEN);
//! let _ = display.present();
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::Rgb565,
    prelude::Pixel,
    primitives::Rectangle,
};
use embedded_hal::delay::DelayNs;

use crate::backlight::{Backlight, BacklightMode, NoBacklight};
use crate::color::BLACK;
use crate::command::{
    CASET, DISPOFF, DISPON, INIT_SEQUENCE, INVOFF, INVON, MADCTL, RAMWR, RASET, SLPIN, SLPOUT,
    SWRESET, VSCRDEF, VSCSAD, address_range,
};
use crate::config::Config;
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::interface::DisplayInterface;
use crate::rotation::{Rotation, RotationEntry};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Wait after a software reset, and between the first frame and the backlight
pub const RESET_SETTLE_MS: u32 = 150;

/// ST7789 display driver
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Frame storage implementing `AsRef<[u8]> + AsMut<[u8]>`
/// * `BL` - Backlight implementing [`Backlight`]
pub struct Display<I, B, BL = NoBacklight>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// In-memory frame, sent by `present`
    framebuffer: FrameBuffer<B>,
    /// Backlight control
    backlight: BL,
    /// How `set_brightness` drives the backlight
    backlight_mode: BacklightMode,
    /// Rotation in effect
    rotation: Rotation,
    /// Addressing window of the rotation in effect
    window: RotationEntry,
    /// Whether the controller is in sleep mode
    is_sleeping: bool,
}

impl<I, B> Display<I, B, NoBacklight>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Initialize a display without backlight control
    ///
    /// See [`init_with_backlight`](Display::init_with_backlight) for the
    /// sequence performed.
    pub fn init<D: DelayNs>(
        interface: I,
        config: Config,
        buffer: B,
        delay: &mut D,
    ) -> core::result::Result<Self, Error<I>> {
        Self::start(interface, config, buffer, NoBacklight, BacklightMode::None, delay)
    }
}

impl<I, B, BL> Display<I, B, BL>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
    BL: Backlight,
{
    /// Initialize a display and its backlight
    ///
    /// Performs, in order: hardware reset, the init sequence (twice), the
    /// configured rotation, a black frame, a 150ms pause, and the configured
    /// brightness.
    ///
    /// # Arguments
    ///
    /// * `interface` - Bus binding to the controller
    /// * `config` - Configuration from [`Builder`](crate::config::Builder)
    /// * `buffer` - Frame storage, at least [`Config::buffer_size`] bytes
    /// * `backlight` - Backlight, tried as PWM first
    /// * `delay` - Delay implementation for timing
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] before touching the hardware if
    /// `buffer` is too small, or [`Error::Interface`] if a transfer fails.
    pub fn init_with_backlight<D: DelayNs>(
        interface: I,
        config: Config,
        buffer: B,
        backlight: BL,
        delay: &mut D,
    ) -> core::result::Result<Self, Error<I>> {
        Self::start(interface, config, buffer, backlight, BacklightMode::Pwm, delay)
    }

    fn start<D: DelayNs>(
        interface: I,
        config: Config,
        buffer: B,
        backlight: BL,
        backlight_mode: BacklightMode,
        delay: &mut D,
    ) -> core::result::Result<Self, Error<I>> {
        let required = config.buffer_size();
        let provided = buffer.as_ref().len();
        let (width, height) = config.framebuffer_dimensions();
        let framebuffer = FrameBuffer::new(buffer, width, height, config.byte_swap)
            .ok_or(Error::BufferTooSmall { required, provided })?;

        let rotation = config.rotation;
        let mut display = Self {
            interface,
            window: *config.panel.entry(rotation),
            config,
            framebuffer,
            backlight,
            backlight_mode,
            rotation,
            is_sleeping: false,
        };

        log::debug!(
            "Initializing {}x{} panel",
            display.config.panel.width,
            display.config.panel.height
        );
        display.interface.hard_reset(delay).map_err(Error::Interface)?;
        display.send_init_sequence(delay)?;
        display.send_init_sequence(delay)?;
        display.apply_rotation(rotation)?;

        display.framebuffer.fill(BLACK);
        display.present()?;
        delay.delay_ms(RESET_SETTLE_MS);
        display.set_brightness(display.config.brightness);
        Ok(display)
    }

    fn send_init_sequence<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        for step in &INIT_SEQUENCE {
            self.send(step.command, step.data)?;
            if step.delay_ms > 0 {
                delay.delay_ms(step.delay_ms);
            }
        }
        Ok(())
    }

    /// Rotate the display
    ///
    /// On a non-square panel the frame keeps the shape it was created with,
    /// so a quarter turn from the current orientation is ignored (and logged).
    /// Use [`try_set_rotation`](Self::try_set_rotation) to get an error instead.
    pub fn set_rotation(&mut self, rotation: Rotation) -> DisplayResult<I> {
        if self.changes_frame_shape(rotation) {
            log::warn!(
                "Ignoring rotation {:?}: panel is non-square and {:?} is in effect",
                rotation,
                self.rotation
            );
            return Ok(());
        }
        self.apply_rotation(rotation)
    }

    /// Rotate the display, rejecting rotations the frame cannot follow
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleRotation`] for a quarter turn of a
    /// non-square panel; nothing is sent in that case.
    pub fn try_set_rotation(&mut self, rotation: Rotation) -> DisplayResult<I> {
        if self.changes_frame_shape(rotation) {
            return Err(Error::IncompatibleRotation {
                current: self.rotation,
                requested: rotation,
            });
        }
        self.apply_rotation(rotation)
    }

    fn changes_frame_shape(&self, rotation: Rotation) -> bool {
        !self.config.panel.is_square() && rotation.is_landscape() != self.rotation.is_landscape()
    }

    fn apply_rotation(&mut self, rotation: Rotation) -> DisplayResult<I> {
        let entry = *self.config.panel.entry(rotation);
        let madctl = self.config.color_order.apply(entry.madctl);
        let (x0, x1) = entry.columns();
        let (y0, y1) = entry.rows();

        self.send(MADCTL, &[madctl])?;
        self.send(CASET, &address_range(x0, x1))?;
        self.send(RASET, &address_range(y0, y1))?;
        self.send_command(RAMWR)?;

        self.window = entry;
        self.rotation = rotation;
        log::debug!(
            "Rotation {:?}: {}x{} at ({}, {})",
            rotation,
            entry.width,
            entry.height,
            entry.x_start,
            entry.y_start
        );
        Ok(())
    }

    /// Set backlight brightness, `0.0` (off) to `1.0` (full)
    ///
    /// Values outside the range are clamped. A backlight that cannot dim is
    /// switched on for any level above zero, and the display stops trying
    /// PWM from then on.
    pub fn set_brightness(&mut self, level: f32) {
        match self.backlight_mode {
            BacklightMode::None => {}
            BacklightMode::Pwm => {
                let level = level.clamp(0.0, 1.0);
                let duty = (level * f32::from(u16::MAX)) as u16;
                if self.backlight.set_duty(duty).is_err() {
                    log::warn!("Backlight cannot dim, falling back to on/off");
                    self.backlight_mode = BacklightMode::Digital;
                    self.backlight.set_enabled(level > 0.0);
                }
            }
            BacklightMode::Digital => self.backlight.set_enabled(level > 0.0),
        }
    }

    /// Enter or leave sleep mode
    pub fn sleep(&mut self, enter: bool) -> DisplayResult<I> {
        self.send_command(if enter { SLPIN } else { SLPOUT })?;
        self.is_sleeping = enter;
        Ok(())
    }

    /// Enable or disable color inversion
    pub fn invert(&mut self, enter: bool) -> DisplayResult<I> {
        self.send_command(if enter { INVON } else { INVOFF })
    }

    /// Turn the panel output on or off; controller RAM is kept
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.send_command(if on { DISPON } else { DISPOFF })
    }

    /// Software reset
    ///
    /// The controller returns to its power-on register state; the init
    /// sequence is not replayed.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_command(SWRESET)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Define the vertical scrolling area
    ///
    /// `top` and `bottom` are fixed areas, `scroll` the scrolling region
    /// between them, all in controller RAM lines.
    pub fn define_vertical_scroll(
        &mut self,
        top: u16,
        scroll: u16,
        bottom: u16,
    ) -> DisplayResult<I> {
        let [t_hi, t_lo] = top.to_be_bytes();
        let [s_hi, s_lo] = scroll.to_be_bytes();
        let [b_hi, b_lo] = bottom.to_be_bytes();
        self.send(VSCRDEF, &[t_hi, t_lo, s_hi, s_lo, b_hi, b_lo])
    }

    /// Set the first RAM line shown in the scrolling area
    pub fn set_vertical_scroll(&mut self, line: u16) -> DisplayResult<I> {
        self.send(VSCSAD, &line.to_be_bytes())
    }

    /// Send the frame to the panel
    ///
    /// The only operation that transfers pixel data; drawing never does.
    pub fn present(&mut self) -> DisplayResult<I> {
        self.interface
            .send(Some(RAMWR), Some(self.framebuffer.as_bytes()))
            .map_err(Error::Interface)
    }

    /// Logical width of the rotation in effect
    pub fn width(&self) -> u16 {
        self.window.width
    }

    /// Logical height of the rotation in effect
    pub fn height(&self) -> u16 {
        self.window.height
    }

    /// Rotation in effect
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Addressing window of the rotation in effect
    pub fn window(&self) -> &RotationEntry {
        &self.window
    }

    /// How brightness is currently applied
    pub fn backlight_mode(&self) -> BacklightMode {
        self.backlight_mode
    }

    /// Whether sleep mode was entered last
    pub fn is_sleeping(&self) -> bool {
        self.is_sleeping
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The in-memory frame
    pub fn framebuffer(&self) -> &FrameBuffer<B> {
        &self.framebuffer
    }

    /// The in-memory frame, for drawing
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<B> {
        &mut self.framebuffer
    }

    /// Release the interface, frame storage and backlight
    pub fn release(self) -> (I, B, BL) {
        (self.interface, self.framebuffer.release(), self.backlight)
    }

    fn send(&mut self, command: u8, data: &[u8]) -> DisplayResult<I> {
        self.interface
            .send(Some(command), Some(data))
            .map_err(Error::Interface)
    }

    fn send_command(&mut self, command: u8) -> DisplayResult<I> {
        self.interface.send_command(command).map_err(Error::Interface)
    }
}

impl<I, B, BL> DrawTarget for Display<I, B, BL>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.clear(color)
    }
}

impl<I, B, BL> OriginDimensions for Display<I, B, BL>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        self.framebuffer.size()
    }
}
