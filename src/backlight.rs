//! Backlight control
//!
//! The display drives its backlight through the [`Backlight`] trait. Two
//! implementations cover the usual wiring:
//!
//! - [`PwmBacklight`] for a pin behind a PWM channel (dimmable)
//! - [`PinBacklight`] for a plain GPIO (on/off only)
//!
//! A backlight that cannot dim reports [`BacklightCapabilityError`] from
//! [`Backlight::set_duty`]; the display then switches to on/off control for
//! the rest of its lifetime.
//!
//! ## Example
//!
//! ```rust,no_run
//! use st7789_fb::backlight::{Backlight, PwmBacklight};
//! # use core::convert::Infallible;
//! # use embedded_hal::pwm::{ErrorType, SetDutyCycle};
//! # struct MockPwm;
//! # impl ErrorType for MockPwm { type Error = Infallible; }
//! # impl SetDutyCycle for MockPwm {
//! #     fn max_duty_cycle(&self) -> u16 { 1000 }
//! #     fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut backlight = PwmBacklight::new(MockPwm);
//!
//! // Half brightness
//! let _ = backlight.set_duty(0x7FFF);
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

pub use crate::error::BacklightCapabilityError;

/// How the display is currently driving its backlight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BacklightMode {
    /// No backlight control configured
    None,
    /// Proportional brightness through a duty cycle
    Pwm,
    /// On/off only
    Digital,
}

/// A controllable backlight
pub trait Backlight {
    /// Set a proportional duty cycle, `0` = off, `u16::MAX` = fully on
    ///
    /// # Errors
    ///
    /// Returns [`BacklightCapabilityError`] if the backlight cannot be dimmed.
    fn set_duty(&mut self, duty: u16) -> Result<(), BacklightCapabilityError>;

    /// Switch the backlight fully on or off
    fn set_enabled(&mut self, on: bool);
}

/// Backlight on a PWM channel
pub struct PwmBacklight<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    /// Wrap a PWM channel
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Release the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn set_duty(&mut self, duty: u16) -> Result<(), BacklightCapabilityError> {
        self.pwm
            .set_duty_cycle_fraction(duty, u16::MAX)
            .map_err(|e| {
                log::warn!("PWM duty cycle rejected: {:?}", e);
                BacklightCapabilityError
            })
    }

    fn set_enabled(&mut self, on: bool) {
        let result = if on {
            self.pwm.set_duty_cycle_fully_on()
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        if let Err(e) = result {
            log::warn!("Backlight switch failed: {:?}", e);
        }
    }
}

/// Backlight on a plain GPIO, active high
pub struct PinBacklight<P> {
    pin: P,
}

impl<P: OutputPin> PinBacklight<P> {
    /// Wrap an output pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Backlight for PinBacklight<P> {
    fn set_duty(&mut self, _duty: u16) -> Result<(), BacklightCapabilityError> {
        Err(BacklightCapabilityError)
    }

    fn set_enabled(&mut self, on: bool) {
        if let Err(e) = self.pin.set_state(on.into()) {
            log::warn!("Backlight switch failed: {:?}", e);
        }
    }
}

/// Placeholder backlight type for displays without backlight control
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBacklight;

impl Backlight for NoBacklight {
    fn set_duty(&mut self, _duty: u16) -> Result<(), BacklightCapabilityError> {
        Ok(())
    }

    fn set_enabled(&mut self, _on: bool) {}
}
