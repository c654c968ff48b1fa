//! Frame encoding
//!
//! This module converts pixel intensities into the controller's display RAM
//! layout.
//!
//! The SSD1306 stores pixels in pages: each page is a band of 8 rows, and each
//! byte in a page holds one column of those 8 rows, LSB at the top. In
//! horizontal addressing mode the controller fills page 0 left to right, then
//! page 1, and so on, so a full frame is 8 pages of 128 bytes.
//!
//! ## Polarity
//!
//! A pixel whose intensity exceeds [`INK_THRESHOLD`] sets its bit, which lights
//! the segment on a panel in normal (non-inverted) mode. Content drawn dark on
//! a light background therefore shows as lit pixels on a dark panel.
//!
//! ## Example
//!
//! ```
//! use ssd1306_panel::{PageBuffer, PixelSurface, encoder::locate};
//!
//! // Pixel (0, 7) is the MSB of the first byte
//! assert_eq!(locate(0, 7), (0, 0x80));
//!
//! // Pixel (5, 8) opens page 1
//! assert_eq!(locate(5, 8), (128 + 5, 0x01));
//!
//! let mut surface = PixelSurface::new();
//! surface.set_intensity(0, 7, 1.0);
//! let frame = PageBuffer::encode(&surface);
//! assert_eq!(frame.as_bytes()[0], 0x80);
//! ```

use crate::config::{BUFFER_SIZE, HEIGHT, INK_THRESHOLD, WIDTH};
use crate::error::InvalidSurface;
use crate::surface::{IntensityGrid, PixelSurface};

/// Locate a pixel in display RAM
///
/// Converts panel coordinates to `(byte_index, bit_mask)`:
/// - `byte_index`: `page * 128 + x`, where `page = y / 8`
/// - `bit_mask`: `1 << (y % 8)`
///
/// # Arguments
///
/// * `x` - Column, 0 to 127
/// * `y` - Row, 0 to 63
pub fn locate(x: u32, y: u32) -> (usize, u8) {
    let index = ((y / 8) * WIDTH + x) as usize;
    let bit = 0x01 << (y % 8);
    (index, bit)
}

/// One full frame in wire format
///
/// Always exactly [`BUFFER_SIZE`] bytes, laid out as 8 pages of 128 columns.
#[derive(Clone, PartialEq, Eq)]
pub struct PageBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl core::fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageBuffer")
            .field("len", &BUFFER_SIZE)
            .field(
                "lit",
                &self.bytes.iter().map(|b| b.count_ones()).sum::<u32>(),
            )
            .finish()
    }
}

impl PageBuffer {
    /// Encode a panel surface
    ///
    /// Total over the 128x64 domain and free of side effects.
    pub fn encode(surface: &PixelSurface) -> Self {
        Self::pack(surface)
    }

    /// Encode an external grid
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSurface`] if the grid is not 128x64.
    pub fn try_encode<G: IntensityGrid + ?Sized>(grid: &G) -> Result<Self, InvalidSurface> {
        let (width, height) = grid.dimensions();
        if width != WIDTH || height != HEIGHT {
            return Err(InvalidSurface { width, height });
        }
        Ok(Self::pack(grid))
    }

    /// Wire bytes in transmission order
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Page `page` (0..8) as 128 column bytes
    ///
    /// # Panics
    ///
    /// Panics if `page` is 8 or more.
    pub fn page(&self, page: usize) -> &[u8] {
        let start = page * WIDTH as usize;
        &self.bytes[start..start + WIDTH as usize]
    }

    fn pack<G: IntensityGrid + ?Sized>(grid: &G) -> Self {
        let mut bytes = [0u8; BUFFER_SIZE];
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if grid.intensity(x, y) > INK_THRESHOLD {
                    let (index, bit) = locate(x, y);
                    bytes[index] |= bit;
                }
            }
        }
        Self { bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_ink(x: u32, y: u32) -> PageBuffer {
        let mut surface = PixelSurface::new();
        surface.set_intensity(x, y, 1.0);
        PageBuffer::encode(&surface)
    }

    #[test]
    fn test_locate() {
        assert_eq!(locate(0, 0), (0, 0x01));
        assert_eq!(locate(0, 7), (0, 0x80));
        assert_eq!(locate(1, 0), (1, 0x01));
        assert_eq!(locate(127, 63), (1023, 0x80));
    }

    #[test]
    fn test_encode_background_is_all_zero() {
        let frame = PageBuffer::encode(&PixelSurface::new());
        assert_eq!(frame.as_bytes().len(), 1024);
        assert!(frame.as_bytes().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_encode_ink_is_all_ones() {
        let frame = PageBuffer::encode(&PixelSurface::filled(1.0));
        assert!(frame.as_bytes().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_encode_single_pixels() {
        assert_eq!(single_ink(0, 0).as_bytes()[0], 0x01);
        assert_eq!(single_ink(0, 7).as_bytes()[0], 0x80);
        assert_eq!(single_ink(1, 0).as_bytes()[1], 0x01);

        let frame = single_ink(1, 0);
        assert_eq!(frame.as_bytes()[0], 0x00);
        assert_eq!(frame.as_bytes().iter().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn test_encode_page_boundary() {
        let frame = single_ink(10, 8);
        assert_eq!(frame.page(0), &[0u8; 128][..]);
        assert_eq!(frame.page(1)[10], 0x01);
    }

    #[test]
    fn test_encode_threshold_is_exclusive() {
        let frame = PageBuffer::encode(&PixelSurface::filled(0.5));
        assert!(frame.as_bytes().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn test_encode_column_stripe() {
        let mut surface = PixelSurface::new();
        for y in 0..HEIGHT {
            surface.set_intensity(3, y, 0.9);
        }
        let frame = PageBuffer::encode(&surface);
        for page in 0..8 {
            assert_eq!(frame.page(page)[3], 0xFF);
            assert_eq!(frame.page(page)[2], 0x00);
        }
    }

    struct Grid {
        width: u32,
        height: u32,
    }

    impl IntensityGrid for Grid {
        fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn intensity(&self, x: u32, y: u32) -> f32 {
            if x == y { 1.0 } else { 0.0 }
        }
    }

    #[test]
    fn test_try_encode_external_grid() {
        let frame = PageBuffer::try_encode(&Grid {
            width: 128,
            height: 64,
        })
        .unwrap();
        assert_eq!(frame.as_bytes()[0], 0x01);
        assert_eq!(frame.as_bytes()[7], 0x80);
        assert_eq!(frame.as_bytes()[128 + 8], 0x01);
    }

    #[test]
    fn test_try_encode_rejects_wrong_size() {
        let result = PageBuffer::try_encode(&Grid {
            width: 128,
            height: 32,
        });
        assert_eq!(
            result,
            Err(InvalidSurface {
                width: 128,
                height: 32
            })
        );
    }
}
