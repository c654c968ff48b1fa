//! Graphics support via embedded-graphics
//!
//! This module implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem for [`PixelSurface`], so shapes, text and
//! images can be rendered straight into a frame.
//!
//! [`BinaryColor::On`] draws ink (intensity `1.0`, a lit pixel) and
//! [`BinaryColor::Off`] draws background (intensity `0.0`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Ellipse, PrimitiveStyle, Rectangle},
//! };
//! use ssd1306_panel::{Builder, I2cTransport, Ssd1306};
//! # use core::convert::Infallible;
//! # use embedded_hal::i2c::{ErrorType, I2c, Operation};
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
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Ssd1306::new(I2cTransport::new(MockI2c), config);
//! if display.initialize().is_err() {
//!     return;
//! }
//!
//! let mut surface = display.surface();
//!
//! // Frame and an inscribed ellipse
//! let _ = Rectangle::new(Point::zero(), Size::new(128, 64))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut surface);
//! let _ = Ellipse::new(Point::new(10, 10), Size::new(108, 44))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut surface);
//!
//! let _ = display.update(&surface);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::config::{HEIGHT, WIDTH};
use crate::surface::PixelSurface;

fn intensity_of(color: BinaryColor) -> f32 {
    match color {
        BinaryColor::On => 1.0,
        BinaryColor::Off => 0.0,
    }
}

impl DrawTarget for PixelSurface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= WIDTH || y >= HEIGHT {
                continue;
            }

            self.set_intensity(x, y, intensity_of(color));
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(intensity_of(color));
        Ok(())
    }
}

impl OriginDimensions for PixelSurface {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::PageBuffer;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[test]
    fn test_size_matches_panel() {
        assert_eq!(PixelSurface::new().size(), Size::new(128, 64));
    }

    #[test]
    fn test_draw_iter_skips_out_of_bounds() {
        let mut surface = PixelSurface::new();
        let pixels = [
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(128, 0), BinaryColor::On),
            Pixel(Point::new(0, 64), BinaryColor::On),
            Pixel(Point::new(2, 3), BinaryColor::On),
        ];
        surface.draw_iter(pixels).unwrap();

        assert!(surface.is_ink(2, 3));
        assert_eq!(surface.as_slice().iter().filter(|p| **p > 0.0).count(), 1);
    }

    #[test]
    fn test_clear_fills_surface() {
        let mut surface = PixelSurface::new();
        DrawTarget::clear(&mut surface, BinaryColor::On).unwrap();
        assert_eq!(surface, PixelSurface::filled(1.0));

        DrawTarget::clear(&mut surface, BinaryColor::Off).unwrap();
        assert_eq!(surface, PixelSurface::new());
    }

    #[test]
    fn test_outline_rectangle_encodes_to_border() {
        let mut surface = PixelSurface::new();
        Rectangle::new(Point::zero(), Size::new(128, 64))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut surface)
            .unwrap();

        let frame = PageBuffer::encode(&surface);
        // Top edge is bit 0 of page 0, bottom edge bit 7 of page 7
        assert_eq!(frame.page(0)[64], 0x01);
        assert_eq!(frame.page(7)[64], 0x80);
        // Left and right edges are full columns
        assert_eq!(frame.page(3)[0], 0xFF);
        assert_eq!(frame.page(3)[127], 0xFF);
        assert_eq!(frame.page(3)[64], 0x00);
    }

    #[test]
    fn test_background_drawing_erases_ink() {
        let mut surface = PixelSurface::filled(1.0);
        Pixel(Point::new(5, 5), BinaryColor::Off)
            .draw(&mut surface)
            .unwrap();
        assert!(!surface.is_ink(5, 5));
        assert!(surface.is_ink(5, 6));
    }
}
