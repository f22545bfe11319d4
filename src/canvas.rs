/*
 *  canvas.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Square RGB framebuffer composed fresh on every tick
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

/// A square `Rgb888` raster the size of the device's pixel dimension.
///
/// A fresh canvas is allocated per update and moved into the device sink
/// when the frame is complete; no pixel state is carried across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    buf: Vec<Rgb888>,
    side: u32,
}

impl Canvas {
    pub fn new(side: u32) -> Self {
        let n = side as usize * side as usize;
        Self { buf: vec![Rgb888::BLACK; n], side }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Read back one pixel. Coordinates must be inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb888 {
        debug_assert!(x < self.side && y < self.side);
        self.buf[(y * self.side + x) as usize]
    }

    /// Row-major pixel access (useful for pushing the frame to a sink).
    pub fn as_slice(&self) -> &[Rgb888] {
        &self.buf
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as u32, p.y as u32);
            if x < self.side && y < self.side {
                return Some((y * self.side + x) as usize);
            }
        }
        None
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.side, self.side)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_canvas_is_blank() {
        let canvas = Canvas::new(4);
        assert!(canvas.as_slice().iter().all(|&p| p == Rgb888::BLACK));
        assert_eq!(canvas.size(), Size::new(4, 4));
    }

    #[test]
    fn test_draw_clips_out_of_bounds() {
        let mut canvas = Canvas::new(2);
        canvas
            .draw_iter([
                Pixel(Point::new(1, 1), Rgb888::RED),
                Pixel(Point::new(-1, 0), Rgb888::RED),
                Pixel(Point::new(2, 0), Rgb888::RED),
            ])
            .unwrap();
        assert_eq!(canvas.pixel(1, 1), Rgb888::RED);
        assert_eq!(canvas.pixel(0, 0), Rgb888::BLACK);
    }
}
