//! Color handling and default palette for the canvas.
//!
//! The canvas draws with plain RGB colors; the config file spells them as
//! `#rrggbb` strings, which deserialize through [`Color`]'s `TryFrom`
//! impl.

use serde::{Deserialize, Serialize};

use crate::Error;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string.
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        Ok(Color::new(byte(0), byte(2), byte(4)))
    }

    /// Format as a `#rrggbb` hex string.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> crate::Result<Self> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.hex()
    }
}

/// Canvas defaults: the rendered page is white with black strokes.
pub mod canvas {
    use super::Color;

    /// Background painted before any geometry.
    pub const BACKGROUND: Color = Color::WHITE;
    /// Stroke color for node boxes and edge splines.
    pub const STROKE: Color = Color::BLACK;
    /// Default stroke width in pixels.
    pub const LINE_WIDTH: f64 = 1.0;
}

/// Editor window defaults, in points.
pub mod window {
    pub const WIDTH: f32 = 640.0;
    pub const HEIGHT: f32 = 480.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex("#1a2b3c").unwrap();
        assert_eq!(c, Color::new(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Color::new(255, 0, 128);
        assert_eq!(Color::from_hex(&c.hex()).unwrap(), c);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Color::from_hex("ffffff").is_err());
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("#ffffff00").is_err());
    }

    #[test]
    fn test_constants() {
        assert_eq!(Color::WHITE.hex(), "#ffffff");
        assert_eq!(Color::BLACK.hex(), "#000000");
        assert_eq!(canvas::BACKGROUND, Color::WHITE);
        assert_eq!(canvas::STROKE, Color::BLACK);
    }
}
