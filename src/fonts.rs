//! Named font registry for slot text.
//!
//! Slots reference fonts by name in the configuration; unknown names fall
//! back to the regular face so a typo never blanks a slot.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{
    FONT_5X8, FONT_6X10, FONT_6X13, FONT_7X13_BOLD, FONT_9X15, FONT_10X20,
};
use log::warn;

/// Face used when a slot has no font configured.
pub const DEFAULT_FONT_NAME: &str = "regular";

pub fn default_font() -> &'static MonoFont<'static> {
    &FONT_6X10
}

/// Resolve a configured font name to a raster face.
pub fn by_name(name: &str) -> &'static MonoFont<'static> {
    match name.to_ascii_lowercase().as_str() {
        "thin" | "small" => &FONT_5X8,
        "regular" => &FONT_6X10,
        "medium" => &FONT_6X13,
        "bold" => &FONT_7X13_BOLD,
        "large" => &FONT_9X15,
        "huge" => &FONT_10X20,
        other => {
            warn!("unrecognized font {:?}, using {}", other, DEFAULT_FONT_NAME);
            default_font()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_faces() {
        assert!(std::ptr::eq(by_name("regular"), default_font()));
        assert!(!std::ptr::eq(by_name("bold"), default_font()));
        assert!(std::ptr::eq(by_name("Small"), by_name("thin")));
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert!(std::ptr::eq(by_name("comic sans"), default_font()));
    }
}
