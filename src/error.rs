//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus and GPIO errors
//! - [`BacklightCapabilityError`] - Backlight cannot dim; handled inside the driver
//!
//! ## Example
//!
//! ```
//! use st7789_fb::{Builder, BuilderError};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // No such panel
//! let result = Builder::new().dimensions(320, 480).build();
//! assert!(matches!(result, Err(BuilderError::UnsupportedPanel { .. })));
//! ```

use crate::interface::DisplayInterface;
use crate::panel::SUPPORTED_PANELS;
use crate::rotation::Rotation;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
pub enum Error<I: DisplayInterface> {
    /// Interface error (bus/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Framebuffer storage is too small for the panel
    ///
    /// The provided buffer must be at least `width * height * 2` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Rotation would change the framebuffer shape
    ///
    /// Non-square panels can only turn by 180 degrees from their current
    /// orientation.
    IncompatibleRotation {
        /// Rotation in effect
        current: Rotation,
        /// Rotation that was requested
        requested: Rotation,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::IncompatibleRotation { current, requested } => {
                write!(
                    f,
                    "Cannot rotate non-square panel from {current:?} to {requested:?}"
                )
            }
        }
    }
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
            Self::IncompatibleRotation { current, requested } => f
                .debug_struct("IncompatibleRotation")
                .field("current", current)
                .field("requested", requested)
                .finish(),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called
    /// before building.
    MissingDimensions,
    /// No panel in [`SUPPORTED_PANELS`] has these dimensions
    UnsupportedPanel {
        /// Requested physical width
        width: u16,
        /// Requested physical height
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::UnsupportedPanel { width, height } => {
                write!(
                    f,
                    "Unsupported {width}x{height} display. Supported displays: "
                )?;
                for (i, panel) in SUPPORTED_PANELS.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}x{}", panel.width, panel.height)?;
                }
                Ok(())
            }
        }
    }
}

impl core::error::Error for BuilderError {}

/// The backlight cannot be driven proportionally
///
/// Returned by [`Backlight::set_duty`](crate::backlight::Backlight::set_duty).
/// The display reacts by switching to on/off control for the rest of its
/// lifetime; callers never see this error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BacklightCapabilityError;

impl core::fmt::Display for BacklightCapabilityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Backlight does not support PWM")
    }
}

impl core::error::Error for BacklightCapabilityError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_unsupported_panel_lists_supported_sizes() {
        let err = BuilderError::UnsupportedPanel {
            width: 320,
            height: 480,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported 320x480 display. Supported displays: \
             240x320, 170x320, 240x240, 135x240, 128x128"
        );
    }

    #[test]
    fn test_missing_dimensions_message() {
        assert_eq!(
            BuilderError::MissingDimensions.to_string(),
            "Dimensions must be specified"
        );
    }
}
