//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! surface validation ([`InvalidSurface`]) and controller operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`InvalidSurface`] - An external pixel grid does not match the panel
//! - [`Error`] - Runtime errors during controller operations
//!
//! ## Example
//!
//! ```
//! use ssd1306_panel::{Builder, BuilderError};
//!
//! // 0x50 is not an SSD1306 address
//! let result = Builder::new().address(0x50).build();
//! assert!(matches!(result, Err(BuilderError::InvalidAddress(0x50))));
//! ```

use crate::display::State;
use crate::interface::Transport;

/// Errors that can occur when driving the panel
///
/// Generic over the transport type to preserve the specific error type.
/// This allows error handling code to match on the underlying bus error.
#[derive(Debug)]
pub enum Error<T: Transport> {
    /// The transport could not open a session
    ///
    /// The bus is unavailable or the device did not answer at the configured
    /// address.
    Open(T::Error),
    /// The initialization sequence could not complete
    ///
    /// Wraps the first failed register write. The session has been closed
    /// again and the controller is not ready.
    Init {
        /// Index of the failing command in [`INIT_SEQUENCE`](crate::command::INIT_SEQUENCE)
        step: usize,
        /// Underlying transport error
        source: T::Error,
    },
    /// A command register write failed
    Write(T::Error),
    /// A display data write failed mid-frame
    ///
    /// The panel keeps the bytes that were already written, so it may show a
    /// torn frame until the next successful update.
    Frame {
        /// Data bytes written before the failure
        written: usize,
        /// Underlying transport error
        source: T::Error,
    },
    /// Pixel grid does not match the panel geometry
    InvalidSurface {
        /// Width of the rejected grid
        width: u32,
        /// Height of the rejected grid
        height: u32,
    },
    /// Operation requires an initialized controller
    NotReady(State),
}

impl<T: Transport> core::fmt::Display for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Open(e) => write!(f, "Failed to open device: {e:?}"),
            Self::Init { step, source } => {
                write!(f, "Initialization failed at command {step}: {source:?}")
            }
            Self::Write(e) => write!(f, "Command write failed: {e:?}"),
            Self::Frame { written, source } => write!(
                f,
                "Frame transfer aborted after {written} bytes: {source:?}"
            ),
            Self::InvalidSurface { width, height } => write!(
                f,
                "Invalid surface: {width}x{height} (expected {}x{})",
                crate::config::WIDTH,
                crate::config::HEIGHT
            ),
            Self::NotReady(state) => write!(f, "Controller not ready (state: {state:?})"),
        }
    }
}

impl<T: Transport + core::fmt::Debug> core::error::Error for Error<T> {}

impl<T: Transport> From<InvalidSurface> for Error<T> {
    fn from(err: InvalidSurface) -> Self {
        Self::InvalidSurface {
            width: err.width,
            height: err.height,
        }
    }
}

/// Pixel grid dimensions do not match the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidSurface {
    /// Width of the rejected grid
    pub width: u32,
    /// Height of the rejected grid
    pub height: u32,
}

impl core::fmt::Display for InvalidSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Invalid surface: {}x{} (expected {}x{})",
            self.width,
            self.height,
            crate::config::WIDTH,
            crate::config::HEIGHT
        )
    }
}

impl core::error::Error for InvalidSurface {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Address is not one the SSD1306 answers on
    InvalidAddress(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidAddress(address) => write!(
                f,
                "Invalid address 0x{address:02X} (expected 0x{:02X} or 0x{:02X})",
                crate::config::DEFAULT_ADDRESS,
                crate::config::ALTERNATE_ADDRESS
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
