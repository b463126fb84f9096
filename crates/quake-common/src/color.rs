//! RGB colors and the fixed map palette.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }
}

/// Colors of the non-event layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub axis: Color,
    pub shore: Color,
    pub depth: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            axis: Color::GRAY,
            shore: Color::CYAN,
            depth: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#00ffff"), Some(Color::CYAN));
        assert_eq!(Color::from_hex("#808080"), Some(Color::GRAY));
        assert_eq!(Color::from_hex("00ffff"), None);
        assert_eq!(Color::from_hex("#0fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_default_palette_layers_are_distinct() {
        let p = Palette::default();
        assert_ne!(p.background, p.shore);
        assert_ne!(p.background, p.axis);
        assert_ne!(p.shore, p.axis);
    }
}
