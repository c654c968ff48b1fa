//! SSD1306 OLED Display Driver
//!
//! A driver for 128x64 monochrome OLED panels built on the SSD1306 controller,
//! connected over I2C.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 I2C support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Pluggable bus [`Transport`] for alternative backends and testing
//! - PBM export of surfaces for debugging (with `std` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use ssd1306_panel::{Builder, I2cTransport, Ssd1306};
//!
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
//! # let i2c = MockI2c;
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Ssd1306::new(I2cTransport::new(i2c), config);
//! if display.initialize().is_err() {
//!     return;
//! }
//!
//! let mut surface = display.surface();
//! surface.set_intensity(10, 20, 1.0);
//! let _ = display.update(&surface);
//!
//! display.close();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// SSD1306 command definitions
pub mod command;
/// Panel geometry, bus constants and configuration builder
pub mod config;
/// Core display operations
pub mod display;
/// Frame encoding
pub mod encoder;
/// Error types for the driver
pub mod error;
/// Bus transport abstraction
pub mod interface;
/// Pixel intensity surfaces
pub mod surface;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use command::{Command, INIT_SEQUENCE, Opcode};
pub use config::{
    ALTERNATE_ADDRESS, BUFFER_SIZE, Builder, CONTROL_COMMAND, CONTROL_DATA, Config,
    DEFAULT_ADDRESS, HEIGHT, INK_THRESHOLD, WIDTH,
};
pub use display::{Ssd1306, State};
pub use encoder::PageBuffer;
pub use error::{BuilderError, Error, InvalidSurface};
pub use interface::{I2cHandle, I2cTransport, Transport};
pub use surface::{IntensityGrid, PixelSurface};
