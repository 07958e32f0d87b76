//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`SpiInterface`]
//! struct for communicating with the ST7789 controller over a 4-wire SPI bus.
//! The 8080 parallel variant lives in [`crate::parallel`].
//!
//! ## Hardware Requirements
//!
//! The ST7789 on SPI requires:
//! - SPI bus (MOSI + SCK), mode 0 or 3
//! - **DC**: Data/Command select (output, required)
//! - **RST**: Reset (output, active low, optional)
//! - **CS**: Chip select (output, active low, optional)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use st7789_fb::{DisplayInterface, SpiInterface};
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
//! // DC is required; reset and chip select are optional
//! let mut interface = SpiInterface::new(MockSpi, MockPin)
//!     .with_reset(MockPin)
//!     .with_cs(MockPin);
//!
//! // Command with parameters, one chip-select cycle
//! let _ = interface.send(Some(0x36), Some(&[0xA8]));
//!
//! // Command only
//! let _ = interface.send_command(0x29);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, OutputPin};
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Reset pulse timing in milliseconds
///
/// Some modules fail to come up with shorter pulses.
pub const RESET_TIMING_MS: [u32; 3] = [10, 10, 120];

/// Trait for the transport to an ST7789 controller
///
/// This trait abstracts over the bus binding, allowing the
/// [`Display`](crate::display::Display) to work with SPI, 8080 parallel, or
/// any other transport that can separate commands from parameters.
///
/// ## Implementing
///
/// For most cases, use [`SpiInterface`] or
/// [`ParallelInterface`](crate::parallel::ParallelInterface). If you need
/// custom behavior (e.g., a DMA-driven bus), implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send one logical write: an optional command byte, then optional parameters
    ///
    /// The implementation must:
    /// 1. Assert chip select, if it has one
    /// 2. If `command` is given, send it in command mode (DC low)
    /// 3. If `data` is given, send it in data mode (DC high)
    /// 4. Release chip select
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send(
        &mut self,
        command: Option<u8>,
        data: Option<&[u8]>,
    ) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must, in order:
    /// 1. Assert chip select (if present)
    /// 2. Drive RST low, then high
    /// 3. Wait 10ms, drive RST low
    /// 4. Wait 10ms, drive RST high
    /// 5. Wait 120ms, release chip select
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Send a command byte with no parameters
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.send(Some(command), None)
    }

    /// Send parameter bytes with no command
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.send(None, Some(data))
    }
}

/// Errors that can occur at the interface level
///
/// Generic over the bus error type. GPIO errors are reduced to their
/// [`ErrorKind`] so optional pins of different types can share one error.
#[derive(Debug, PartialEq)]
pub enum InterfaceError<BusErr> {
    /// SPI or parallel bus error
    Bus(BusErr),
    /// GPIO pin error
    Pin(ErrorKind),
}

impl<BusErr: Debug> core::fmt::Display for InterfaceError<BusErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug> core::error::Error for InterfaceError<BusErr> {}

pub(crate) fn pin_error<BusErr, E: digital::Error>(e: E) -> InterfaceError<BusErr> {
    InterfaceError::Pin(e.kind())
}

/// Drive an optional pin; absent pins are skipped
pub(crate) fn drive<P: OutputPin>(pin: &mut Option<P>, high: bool) -> Result<(), ErrorKind> {
    match pin {
        Some(pin) if high => pin.set_high().map_err(|e| digital::Error::kind(&e)),
        Some(pin) => pin.set_low().map_err(|e| digital::Error::kind(&e)),
        None => Ok(()),
    }
}

/// Reset pulse shared by every bus binding
pub(crate) fn reset_sequence<RST, CS, D>(
    rst: &mut Option<RST>,
    cs: &mut Option<CS>,
    delay: &mut D,
) -> Result<(), ErrorKind>
where
    RST: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    let [first, second, settle] = RESET_TIMING_MS;
    drive(cs, false)?;
    drive(rst, false)?;
    drive(rst, true)?;
    delay.delay_ms(first);
    drive(rst, false)?;
    delay.delay_ms(second);
    drive(rst, true)?;
    delay.delay_ms(settle);
    drive(cs, true)
}

/// Placeholder for an unconnected optional pin
///
/// Used as the type parameter of [`SpiInterface`] and
/// [`ParallelInterface`](crate::parallel::ParallelInterface) when no reset
/// or chip-select line is wired.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl digital::ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// SPI interface implementation for ST7789
///
/// Implements [`DisplayInterface`] for an embedded-hal v1.0 [`SpiBus`] plus a
/// DC line. Chip select is driven by this struct rather than by an
/// `SpiDevice`, because it must stay asserted across the command and data
/// phases while DC toggles.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`] ([`NoPin`] when absent)
/// * `CS` - Chip-select pin implementing [`OutputPin`] ([`NoPin`] when absent)
pub struct SpiInterface<SPI, DC, RST = NoPin, CS = NoPin> {
    /// SPI bus for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: Option<RST>,
    /// Chip-select pin (active low)
    cs: Option<CS>,
}

impl<SPI, DC> SpiInterface<SPI, DC, NoPin, NoPin>
where
    SPI: SpiBus,
    DC: OutputPin,
{
    /// Create a new SpiInterface with no reset or chip-select line
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self {
            spi,
            dc,
            rst: None,
            cs: None,
        }
    }
}

impl<SPI, DC, RST, CS> SpiInterface<SPI, DC, RST, CS> {
    /// Attach a reset line (active low)
    pub fn with_reset<R: OutputPin>(self, rst: R) -> SpiInterface<SPI, DC, R, CS> {
        SpiInterface {
            spi: self.spi,
            dc: self.dc,
            rst: Some(rst),
            cs: self.cs,
        }
    }

    /// Attach a chip-select line (active low)
    pub fn with_cs<C: OutputPin>(self, cs: C) -> SpiInterface<SPI, DC, RST, C> {
        SpiInterface {
            spi: self.spi,
            dc: self.dc,
            rst: self.rst,
            cs: Some(cs),
        }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, Option<RST>, Option<CS>) {
        (self.spi, self.dc, self.rst, self.cs)
    }
}

impl<SPI, DC, RST, CS> SpiInterface<SPI, DC, RST, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
{
    fn write(
        &mut self,
        command: Option<u8>,
        data: Option<&[u8]>,
    ) -> InterfaceResult<(), InterfaceError<SPI::Error>> {
        if let Some(command) = command {
            self.dc.set_low().map_err(pin_error::<SPI::Error, _>)?;
            self.spi.write(&[command]).map_err(InterfaceError::Bus)?;
            self.spi.flush().map_err(InterfaceError::Bus)?;
        }
        if let Some(data) = data {
            self.dc.set_high().map_err(pin_error::<SPI::Error, _>)?;
            self.spi.write(data).map_err(InterfaceError::Bus)?;
            self.spi.flush().map_err(InterfaceError::Bus)?;
        }
        Ok(())
    }
}

impl<SPI, DC, RST, CS> DisplayInterface for SpiInterface<SPI, DC, RST, CS>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    DC: OutputPin,
    RST: OutputPin,
    CS: OutputPin,
{
    type Error = InterfaceError<SPI::Error>;

    fn send(
        &mut self,
        command: Option<u8>,
        data: Option<&[u8]>,
    ) -> InterfaceResult<(), Self::Error> {
        drive(&mut self.cs, false).map_err(InterfaceError::<SPI::Error>::Pin)?;
        let written = self.write(command, data);
        // Release CS even when the write failed
        let released = drive(&mut self.cs, true).map_err(InterfaceError::Pin);
        written.and(released)
    }

    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        reset_sequence(&mut self.rst, &mut self.cs, delay).map_err(InterfaceError::Pin)
    }
}
