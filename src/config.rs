//! Panel geometry, bus constants and configuration builder

pub use crate::error::BuilderError;

/// Panel width in pixels (columns / segment outputs)
pub const WIDTH: u32 = 128;

/// Panel height in pixels (rows / COM outputs)
pub const HEIGHT: u32 = 64;

/// Number of 8-row pages in display RAM
pub const PAGES: u32 = HEIGHT / 8;

/// Size of one full frame in wire format (8 pages of 128 columns)
pub const BUFFER_SIZE: usize = (WIDTH * HEIGHT / 8) as usize;

/// Default 7-bit I2C address (SA0 pulled low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Alternate 7-bit I2C address (SA0 pulled high)
pub const ALTERNATE_ADDRESS: u8 = 0x3D;

/// Control byte selecting the command register
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte selecting display data RAM
pub const CONTROL_DATA: u8 = 0x40;

/// Intensity above which a pixel counts as ink
///
/// Ink pixels set their RAM bit and are lit on the panel. Intensity exactly
/// at the threshold is background.
pub const INK_THRESHOLD: f32 = 0.5;

/// Driver configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 7-bit I2C address of the controller
    pub address: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
        }
    }
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use ssd1306_panel::{ALTERNATE_ADDRESS, Builder};
///
/// let config = match Builder::new().address(ALTERNATE_ADDRESS).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.address, 0x3D);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// I2C address (defaults to [`DEFAULT_ADDRESS`])
    address: Option<u8>,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the I2C address
    ///
    /// The SSD1306 answers on 0x3C or 0x3D depending on the SA0 strap.
    pub fn address(mut self, address: u8) -> Self {
        self.address = Some(address);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidAddress` if the address is neither
    /// [`DEFAULT_ADDRESS`] nor [`ALTERNATE_ADDRESS`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let address = self.address.unwrap_or(DEFAULT_ADDRESS);
        if address != DEFAULT_ADDRESS && address != ALTERNATE_ADDRESS {
            return Err(BuilderError::InvalidAddress(address));
        }
        Ok(Config { address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_is_one_kib() {
        assert_eq!(BUFFER_SIZE, 1024);
        assert_eq!(PAGES, 8);
    }

    #[test]
    fn test_builder_defaults_to_primary_address() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_accepts_alternate_address() {
        let config = Builder::new().address(ALTERNATE_ADDRESS).build().unwrap();
        assert_eq!(config.address, 0x3D);
    }

    #[test]
    fn test_builder_rejects_foreign_address() {
        let result = Builder::new().address(0x50).build();
        assert!(matches!(result, Err(BuilderError::InvalidAddress(0x50))));
    }
}
