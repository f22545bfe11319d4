/*
 *  widget/layout.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Deterministic partition of the square canvas into per-slot frames
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

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use log::warn;

/// Compute one frame per slot from the layout directives.
///
/// Directives describe horizontal bands stacked top to bottom:
/// `"row"` is a full-width band holding one slot, `"row:N"` (or a bare
/// `"N"`) splits a band into N equal columns consuming the next N slots
/// left to right. Malformed directives are skipped; slots left over once
/// the directives run out each get their own full-width band, so the
/// result always has exactly `slot_count` frames. Bands share the canvas
/// height evenly; the last band and last column absorb the integer
/// remainder so the partition reaches the far edges without gaps.
pub fn format_layout(directives: &[String], slot_count: usize, side: u32) -> Vec<Rectangle> {
    if slot_count == 0 {
        return Vec::new();
    }

    // band list: columns per band, in order
    let mut bands: Vec<usize> = Vec::new();
    let mut consumed = 0usize;
    for directive in directives {
        if consumed >= slot_count {
            break;
        }
        match parse_directive(directive) {
            Some(cols) => {
                let cols = cols.min(slot_count - consumed);
                bands.push(cols);
                consumed += cols;
            }
            None => warn!("ignoring malformed layout directive {:?}", directive),
        }
    }
    while consumed < slot_count {
        bands.push(1);
        consumed += 1;
    }

    let band_height = side / bands.len() as u32;
    let mut frames = Vec::with_capacity(slot_count);
    let mut y = 0u32;
    for (row, &cols) in bands.iter().enumerate() {
        let height = if row == bands.len() - 1 { side - y } else { band_height };
        let col_width = side / cols as u32;
        let mut x = 0u32;
        for col in 0..cols {
            let width = if col == cols - 1 { side - x } else { col_width };
            frames.push(Rectangle::new(
                Point::new(x as i32, y as i32),
                Size::new(width, height),
            ));
            x += width;
        }
        y += height;
    }
    frames
}

/// Number of columns a directive asks for, or None if it doesn't parse.
fn parse_directive(raw: &str) -> Option<usize> {
    let spec = raw.trim().to_ascii_lowercase();
    if spec == "row" {
        return Some(1);
    }
    let count = spec.strip_prefix("row:").unwrap_or(&spec);
    match count.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
