//! Bus transport abstraction
//!
//! This module provides the [`Transport`] trait and the [`I2cTransport`] struct
//! for talking to the SSD1306 controller over I2C.
//!
//! ## Wire Protocol
//!
//! Every byte the controller receives is a separate register write: a control
//! byte selects the command register ([`CONTROL_COMMAND`](crate::CONTROL_COMMAND))
//! or display RAM ([`CONTROL_DATA`](crate::CONTROL_DATA)), followed by exactly
//! one payload byte. Transports must not coalesce writes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use ssd1306_panel::{CONTROL_COMMAND, DEFAULT_ADDRESS, I2cTransport, Transport};
//! # use core::convert::Infallible;
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! let mut transport = I2cTransport::new(MockI2c);
//!
//! let mut handle = match transport.open(DEFAULT_ADDRESS) {
//!     Ok(handle) => handle,
//!     Err(_) => return,
//! };
//!
//! // Display off
//! let _ = transport.write_register(&mut handle, CONTROL_COMMAND, 0xAE);
//!
//! let _ = transport.close(handle);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::I2c;

use crate::command::Opcode;
use crate::config::CONTROL_COMMAND;

type TransportResult<T, E> = core::result::Result<T, E>;

/// Trait for the bus session carrying controller traffic
///
/// This trait abstracts over the physical bus so the
/// [`Ssd1306`](crate::display::Ssd1306) controller can run against real
/// hardware or a recording backend in tests.
///
/// ## Implementing
///
/// For embedded-hal I2C buses, use the provided [`I2cTransport`]. Implement
/// this trait yourself to route traffic through a different binding.
pub trait Transport {
    /// Open bus session
    ///
    /// Consumed by [`close`](Self::close), so a handle can be released only once.
    type Handle;

    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Open a session to the device at `address`
    ///
    /// # Errors
    ///
    /// Returns an error if the bus is unavailable or the device does not
    /// respond at `address`.
    fn open(&mut self, address: u8) -> TransportResult<Self::Handle, Self::Error>;

    /// Write a single payload byte to the register selected by `control`
    ///
    /// # Errors
    ///
    /// Returns an error if the write is not acknowledged.
    fn write_register(
        &mut self,
        handle: &mut Self::Handle,
        control: u8,
        data: u8,
    ) -> TransportResult<(), Self::Error>;

    /// Release the session
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to release the session. The
    /// handle is gone either way.
    fn close(&mut self, handle: Self::Handle) -> TransportResult<(), Self::Error>;
}

/// Session handle produced by [`I2cTransport::open`]
#[derive(Debug, PartialEq)]
pub struct I2cHandle {
    /// 7-bit device address
    address: u8,
}

impl I2cHandle {
    /// Address this session talks to
    pub fn address(&self) -> u8 {
        self.address
    }
}

/// I2C transport for SSD1306
///
/// Implements [`Transport`] for any embedded-hal v1.0 [`I2c`] bus. Timeouts
/// and bus recovery are the responsibility of the `I2c` implementation.
///
/// ## Type Parameters
///
/// * `I2C` - Bus implementing [`I2c`]
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    /// Underlying I2C bus
    i2c: I2C,
}

impl<I2C> I2cTransport<I2C>
where
    I2C: I2c,
{
    /// Create a new transport over `i2c`
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give back the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Transport for I2cTransport<I2C>
where
    I2C: I2c,
{
    type Handle = I2cHandle;
    type Error = I2C::Error;

    fn open(&mut self, address: u8) -> TransportResult<Self::Handle, Self::Error> {
        // NOP probe: an absent device NACKs its address
        self.i2c
            .write(address, &[CONTROL_COMMAND, Opcode::Nop as u8])?;
        Ok(I2cHandle { address })
    }

    fn write_register(
        &mut self,
        handle: &mut Self::Handle,
        control: u8,
        data: u8,
    ) -> TransportResult<(), Self::Error> {
        self.i2c.write(handle.address, &[control, data])
    }

    fn close(&mut self, _handle: Self::Handle) -> TransportResult<(), Self::Error> {
        Ok(())
    }
}
