//! RGBA color with the editor's named palette.

use std::fmt;

/// An 8-bit RGBA color.
///
/// The color column edits colors by name where one exists (the palette below)
/// and by `#rrggbb`/`#rrggbbaa` hex otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// The palette exposed by name in the color column.
const NAMED: [(&str, Rgba); 9] = [
    ("black", Rgba::BLACK),
    ("white", Rgba::WHITE),
    ("red", Rgba::RED),
    ("green", Rgba::GREEN),
    ("blue", Rgba::BLUE),
    ("cyan", Rgba::CYAN),
    ("magenta", Rgba::MAGENTA),
    ("yellow", Rgba::YELLOW),
    ("gray", Rgba::GRAY),
];

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const GREEN: Rgba = Rgba::opaque(0, 255, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);
    pub const CYAN: Rgba = Rgba::opaque(0, 255, 255);
    pub const MAGENTA: Rgba = Rgba::opaque(255, 0, 255);
    pub const YELLOW: Rgba = Rgba::opaque(255, 255, 0);
    pub const GRAY: Rgba = Rgba::opaque(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The well-known name when one matches, else `#rrggbbaa`.
    pub fn name(&self) -> String {
        for (name, color) in NAMED {
            if *self == color {
                return name.to_string();
            }
        }
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Parse a color from a palette name or `#rrggbb`/`#rrggbbaa` hex.
    pub fn parse(text: &str) -> Option<Rgba> {
        let text = text.trim();
        for (name, color) in NAMED {
            if text.eq_ignore_ascii_case(name) {
                return Some(color);
            }
        }
        let hex = text.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_round_trip_through_name() {
        for (name, color) in NAMED {
            assert_eq!(Rgba::parse(name), Some(color));
            assert_eq!(color.name(), name);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Rgba::parse("Red"), Some(Rgba::RED));
        assert_eq!(Rgba::parse("BLACK"), Some(Rgba::BLACK));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgba::parse("#ff8000"), Some(Rgba::opaque(255, 128, 0)));
        assert_eq!(Rgba::parse("#ff800080"), Some(Rgba::new(255, 128, 0, 128)));
    }

    #[test]
    fn test_unnamed_color_formats_as_hex() {
        let color = Rgba::opaque(255, 128, 0);
        assert_eq!(color.name(), "#ff8000ff");
        assert_eq!(Rgba::parse(&color.name()), Some(color));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Rgba::parse("chartreuse"), None);
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("#gggggg"), None);
        assert_eq!(Rgba::parse(""), None);
    }
}
