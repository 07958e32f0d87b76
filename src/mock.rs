//! Recording mocks for embedded-hal traits, shared by the unit tests

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::interface::DisplayInterface;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Pin(&'static str, bool),
    DelayMs(u32),
    DelayNs(u32),
    Write(Vec<u8>),
    Flush,
}

/// Shared, ordered event log
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            log: self.clone(),
            fail: false,
        }
    }

    pub fn failing_pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            log: self.clone(),
            fail: true,
        }
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi { log: self.clone() }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            log: Some(self.clone()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MockError;

impl digital::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct MockPin {
    name: &'static str,
    log: Log,
    fail: bool,
}

impl digital::ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        self.log.push(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        self.log.push(Event::Pin(self.name, true));
        Ok(())
    }
}

pub struct MockSpi {
    log: Log,
}

impl spi::ErrorType for MockSpi {
    type Error = Infallible;
}

impl SpiBus for MockSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.log.push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.write(words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::Flush);
        Ok(())
    }
}

/// Delay that records requested waits instead of sleeping
#[derive(Default)]
pub struct MockDelay {
    log: Option<Log>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        if let Some(log) = &self.log {
            log.push(Event::DelayNs(ns));
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        if let Some(log) = &self.log {
            log.push(Event::DelayMs(ms));
        }
    }
}

/// One logical `send` seen by [`RecordingInterface`]
#[derive(Clone, Debug, PartialEq)]
pub struct Sent {
    pub command: Option<u8>,
    pub data: Option<Vec<u8>>,
}

/// Display interface that records every send
#[derive(Debug, Default)]
pub struct RecordingInterface {
    pub sent: Vec<Sent>,
    pub resets: usize,
}

impl RecordingInterface {
    pub fn commands(&self) -> Vec<u8> {
        self.sent.iter().filter_map(|s| s.command).collect()
    }

    /// Parameters of the most recent send of `command`
    pub fn last_data_for(&self, command: u8) -> Option<Vec<u8>> {
        self.sent
            .iter()
            .rev()
            .find(|s| s.command == Some(command))
            .and_then(|s| s.data.clone())
    }
}

impl DisplayInterface for RecordingInterface {
    type Error = Infallible;

    fn send(&mut self, command: Option<u8>, data: Option<&[u8]>) -> Result<(), Self::Error> {
        self.sent.push(Sent {
            command,
            data: data.map(<[u8]>::to_vec),
        });
        Ok(())
    }

    fn hard_reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.resets += 1;
        Ok(())
    }
}
