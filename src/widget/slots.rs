/*
 *  widget/slots.rs
 *
 *  kvdeck - keys on glass
 *  (c) 2026 Stuart Hunter
 *
 *  Slot normalization: keys, fonts, colors and frames zipped into one list
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

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::Rectangle;

use crate::{color, fonts};

/// One configured display position: a store key plus everything needed to
/// draw its value. Built once at construction; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Slot {
    pub key: String,
    pub font: &'static MonoFont<'static>,
    pub color: Rgb888,
    pub frame: Rectangle,
}

/// Zip the parallel configuration lists into one slot per key.
///
/// Fonts and colors shorter than the key list are padded with defaults;
/// surplus entries are ignored. `frames` must already be one per key
/// (the layout engine guarantees this).
pub fn build_slots(
    keys: &[String],
    font_names: &[String],
    color_specs: &[String],
    frames: Vec<Rectangle>,
) -> Vec<Slot> {
    debug_assert_eq!(keys.len(), frames.len());
    keys.iter()
        .zip(frames)
        .enumerate()
        .map(|(i, (key, frame))| Slot {
            key: key.clone(),
            font: font_names
                .get(i)
                .map(|name| fonts::by_name(name))
                .unwrap_or_else(fonts::default_font),
            color: color_specs
                .get(i)
                .map(|spec| color::resolve(spec))
                .unwrap_or(color::DEFAULT_COLOR),
            frame,
        })
        .collect()
}
