//! Pixel intensity surfaces
//!
//! A [`PixelSurface`] is the panel-sized grid that drawing code renders into.
//! Each pixel holds an intensity from `0.0` (background, light) to `1.0` (ink,
//! dark). The encoder turns ink into lit segments; see
//! [`INK_THRESHOLD`](crate::config::INK_THRESHOLD).
//!
//! Drawing libraries that keep their own raster can hand it over through the
//! [`IntensityGrid`] trait instead of copying into a `PixelSurface`.
//!
//! ## Example
//!
//! ```
//! use ssd1306_panel::{IntensityGrid, PixelSurface};
//!
//! let mut surface = PixelSurface::new();
//! surface.set_intensity(3, 4, 1.0);
//!
//! assert!(surface.is_ink(3, 4));
//! assert_eq!(surface.dimensions(), (128, 64));
//! ```

use crate::config::{HEIGHT, INK_THRESHOLD, WIDTH};

const PIXELS: usize = (WIDTH * HEIGHT) as usize;

/// Source of pixel intensities
///
/// Implemented by [`PixelSurface`] and by any external raster a caller wants
/// to display. Only grids whose [`dimensions`](Self::dimensions) equal the
/// panel's are accepted for display.
pub trait IntensityGrid {
    /// Grid size as `(width, height)` in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Intensity at `(x, y)`, `0.0` = background, `1.0` = ink
    ///
    /// Only called with coordinates inside [`dimensions`](Self::dimensions).
    fn intensity(&self, x: u32, y: u32) -> f32;
}

/// Fixed 128x64 grid of pixel intensities
#[derive(Clone, PartialEq)]
pub struct PixelSurface {
    /// Row-major intensities
    pixels: [f32; PIXELS],
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let ink = self.pixels.iter().filter(|p| **p > INK_THRESHOLD).count();
        f.debug_struct("PixelSurface")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("ink_pixels", &ink)
            .finish()
    }
}

impl PixelSurface {
    /// Create a surface cleared to background
    pub fn new() -> Self {
        Self {
            pixels: [0.0; PIXELS],
        }
    }

    /// Create a surface filled with one intensity
    pub fn filled(intensity: f32) -> Self {
        Self {
            pixels: [intensity; PIXELS],
        }
    }

    /// Fill every pixel with `intensity`
    pub fn fill(&mut self, intensity: f32) {
        self.pixels.fill(intensity);
    }

    /// Reset every pixel to background
    pub fn clear(&mut self) {
        self.fill(0.0);
    }

    /// Intensity at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the 128x64 panel.
    pub fn intensity(&self, x: u32, y: u32) -> f32 {
        self.pixels[Self::index(x, y)]
    }

    /// Set the intensity at `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the 128x64 panel.
    pub fn set_intensity(&mut self, x: u32, y: u32, intensity: f32) {
        self.pixels[Self::index(x, y)] = intensity;
    }

    /// Whether the pixel at `(x, y)` is ink (lit on the panel)
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.intensity(x, y) > INK_THRESHOLD
    }

    /// Row-major intensities
    pub fn as_slice(&self) -> &[f32] {
        &self.pixels
    }

    /// Mutable row-major intensities
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.pixels
    }

    fn index(x: u32, y: u32) -> usize {
        assert!(
            x < WIDTH && y < HEIGHT,
            "pixel ({x}, {y}) outside {WIDTH}x{HEIGHT} panel"
        );
        (y * WIDTH + x) as usize
    }
}

impl IntensityGrid for PixelSurface {
    fn dimensions(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn intensity(&self, x: u32, y: u32) -> f32 {
        PixelSurface::intensity(self, x, y)
    }
}

#[cfg(feature = "std")]
impl PixelSurface {
    /// Write the surface as a binary PBM (P4) image
    ///
    /// Ink pixels are written black, background white. Intended for
    /// inspecting what would be sent to the panel.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `out`.
    pub fn write_pbm<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        write!(out, "P4\n{WIDTH} {HEIGHT}\n")?;
        let mut row = [0u8; (WIDTH / 8) as usize];
        for y in 0..HEIGHT {
            row.fill(0);
            for x in 0..WIDTH {
                if self.is_ink(x, y) {
                    row[(x / 8) as usize] |= 0x80 >> (x % 8);
                }
            }
            out.write_all(&row)?;
        }
        out.flush()
    }

    /// Save the surface as a PBM file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_pbm<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_pbm(std::io::BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_background() {
        let surface = PixelSurface::new();
        assert!(surface.as_slice().iter().all(|p| *p == 0.0));
        assert_eq!(surface.as_slice().len(), 128 * 64);
    }

    #[test]
    fn test_set_and_get_intensity() {
        let mut surface = PixelSurface::new();
        surface.set_intensity(127, 63, 0.75);
        assert_eq!(surface.intensity(127, 63), 0.75);
        assert_eq!(surface.as_slice()[128 * 64 - 1], 0.75);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut surface = PixelSurface::new();
        surface.set_intensity(0, 0, 0.5);
        surface.set_intensity(1, 0, 0.51);
        assert!(!surface.is_ink(0, 0));
        assert!(surface.is_ink(1, 0));
    }

    #[test]
    fn test_fill_and_clear() {
        let mut surface = PixelSurface::filled(1.0);
        assert!(surface.is_ink(64, 32));
        surface.clear();
        assert_eq!(surface, PixelSurface::new());
    }

    #[test]
    #[should_panic(expected = "outside 128x64 panel")]
    fn test_out_of_range_access_panics() {
        let surface = PixelSurface::new();
        let _ = surface.intensity(128, 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_write_pbm_packs_rows_msb_first() {
        let mut surface = PixelSurface::new();
        surface.set_intensity(0, 0, 1.0);
        surface.set_intensity(9, 1, 1.0);

        let mut out = std::vec::Vec::new();
        surface.write_pbm(&mut out).unwrap();

        let header = b"P4\n128 64\n";
        assert_eq!(&out[..header.len()], header);
        let body = &out[header.len()..];
        assert_eq!(body.len(), 16 * 64);
        assert_eq!(body[0], 0x80);
        assert_eq!(body[16 + 1], 0x40);
        assert_eq!(body.iter().filter(|b| **b != 0).count(), 2);
    }
}
