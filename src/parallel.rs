//! 8080-style parallel bus binding
//!
//! Many ST7789 modules expose an 8-bit Intel 8080 interface instead of SPI.
//! The bus hardware (an LCD peripheral, a PIO program, or plain GPIO) sits
//! behind the [`ParallelBus`] trait; [`ParallelInterface`] adds the reset and
//! chip-select handling and implements [`DisplayInterface`].
//!
//! [`Gpio8Bus`] is a portable bit-banged bus for boards without an LCD
//! peripheral: eight data pins, a write strobe and a DC line.

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, OutputPin, PinState};

use crate::interface::{DisplayInterface, InterfaceError, NoPin, drive, reset_sequence};

/// An 8-bit parallel bus that can tell commands from parameters
pub trait ParallelBus {
    /// Error type for bus operations
    type Error: Debug;

    /// Write one command byte (DC low)
    fn write_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Write parameter or pixel bytes (DC high)
    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Bit-banged 8080 bus over GPIO
///
/// Data is latched by the controller on the rising edge of WR.
pub struct Gpio8Bus<P, WR, DC> {
    /// D0..D7, least significant bit first
    data: [P; 8],
    /// Write strobe (active low)
    wr: WR,
    /// Data/Command select (low=command, high=data)
    dc: DC,
}

impl<P, WR, DC> Gpio8Bus<P, WR, DC>
where
    P: OutputPin,
    WR: OutputPin,
    DC: OutputPin,
{
    /// Create a bus from its data pins (D0 first), WR and DC
    pub fn new(data: [P; 8], wr: WR, dc: DC) -> Self {
        Self { data, wr, dc }
    }

    /// Release the pins
    pub fn release(self) -> ([P; 8], WR, DC) {
        (self.data, self.wr, self.dc)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), ErrorKind> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let state = PinState::from(byte & (1 << bit) != 0);
            pin.set_state(state).map_err(|e| digital::Error::kind(&e))?;
        }
        self.wr.set_low().map_err(|e| digital::Error::kind(&e))?;
        self.wr.set_high().map_err(|e| digital::Error::kind(&e))
    }
}

impl<P, WR, DC> ParallelBus for Gpio8Bus<P, WR, DC>
where
    P: OutputPin,
    WR: OutputPin,
    DC: OutputPin,
{
    type Error = ErrorKind;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(|e| digital::Error::kind(&e))?;
        self.write_byte(command)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(|e| digital::Error::kind(&e))?;
        data.iter().try_for_each(|byte| self.write_byte(*byte))
    }
}

/// Parallel interface implementation for ST7789
///
/// ## Type Parameters
///
/// * `BUS` - Bus implementing [`ParallelBus`]
/// * `RST` - Reset pin implementing [`OutputPin`] ([`NoPin`] when absent)
/// * `CS` - Chip-select pin implementing [`OutputPin`] ([`NoPin`] when absent,
///   e.g. when the bus peripheral drives CS itself)
pub struct ParallelInterface<BUS, RST = NoPin, CS = NoPin> {
    bus: BUS,
    rst: Option<RST>,
    cs: Option<CS>,
}

impl<BUS: ParallelBus> ParallelInterface<BUS, NoPin, NoPin> {
    /// Create a new ParallelInterface with no reset or chip-select line
    pub fn new(bus: BUS) -> Self {
        Self {
            bus,
            rst: None,
            cs: None,
        }
    }
}

impl<BUS, RST, CS> ParallelInterface<BUS, RST, CS> {
    /// Attach a reset line (active low)
    pub fn with_reset<R: OutputPin>(self, rst: R) -> ParallelInterface<BUS, R, CS> {
        ParallelInterface {
            bus: self.bus,
            rst: Some(rst),
            cs: self.cs,
        }
    }

    /// Attach a chip-select line (active low)
    pub fn with_cs<C: OutputPin>(self, cs: C) -> ParallelInterface<BUS, RST, C> {
        ParallelInterface {
            bus: self.bus,
            rst: self.rst,
            cs: Some(cs),
        }
    }

    /// Release the bus and pins
    pub fn release(self) -> (BUS, Option<RST>, Option<CS>) {
        (self.bus, self.rst, self.cs)
    }
}

impl<BUS, RST, CS> DisplayInterface for ParallelInterface<BUS, RST, CS>
where
    BUS: ParallelBus,
    RST: OutputPin,
    CS: OutputPin,
{
    type Error = InterfaceError<BUS::Error>;

    fn send(&mut self, command: Option<u8>, data: Option<&[u8]>) -> Result<(), Self::Error> {
        drive(&mut self.cs, false).map_err(InterfaceError::<BUS::Error>::Pin)?;
        let written = command
            .map_or(Ok(()), |command| self.bus.write_command(command))
            .and_then(|()| data.map_or(Ok(()), |data| self.bus.write_data(data)));
        let released = drive(&mut self.cs, true).map_err(InterfaceError::Pin);
        written.map_err(InterfaceError::Bus).and(released)
    }

    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        reset_sequence(&mut self.rst, &mut self.cs, delay).map_err(InterfaceError::Pin)
    }
}
