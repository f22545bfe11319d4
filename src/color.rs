/*
 *  color.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Slot color parsing: named palette and #RRGGBB hex
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

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use log::warn;

/// Color drawn when a slot has no (or an unparseable) color configured.
pub const DEFAULT_COLOR: Rgb888 = Rgb888::WHITE;

/// Parse a color specification: a palette name or a `#RRGGBB` hex triplet.
pub fn parse(spec: &str) -> Option<Rgb888> {
    let spec = spec.trim();
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex(hex);
    }
    match spec.to_ascii_lowercase().as_str() {
        "black" => Some(Rgb888::BLACK),
        "white" => Some(Rgb888::WHITE),
        "red" => Some(Rgb888::RED),
        "green" => Some(Rgb888::GREEN),
        "blue" => Some(Rgb888::BLUE),
        "yellow" => Some(Rgb888::YELLOW),
        "cyan" => Some(Rgb888::CYAN),
        "magenta" => Some(Rgb888::MAGENTA),
        "orange" => Some(Rgb888::new(0xff, 0xa5, 0x00)),
        "gray" | "grey" => Some(Rgb888::new(0x80, 0x80, 0x80)),
        _ => None,
    }
}

/// Parse with fallback: unknown specs log a warning and resolve to the default.
pub fn resolve(spec: &str) -> Rgb888 {
    parse(spec).unwrap_or_else(|| {
        warn!("unrecognized color {:?}, using default", spec);
        DEFAULT_COLOR
    })
}

fn parse_hex(hex: &str) -> Option<Rgb888> {
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb888::new(r, g, b))
}
