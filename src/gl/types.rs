//! Core types for the indexed rasterizer

use serde::{Deserialize, Serialize};

/// Number of entries in palettes, shifting and transparency tables
pub const PALETTE_MAX: usize = 256;

/// Palette index. Not a color, just a key into the active palette.
pub type Pixel = u8;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from a `0xRRGGBB` value
    pub const fn from_rgb(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse an `AARRGGBB` hex string
    pub fn from_argb_hex(argb: &str) -> Option<Self> {
        let argb = argb.trim_start_matches('#');
        if argb.len() != 8 {
            return None;
        }
        let value = u32::from_str_radix(argb, 16).ok()?;
        Some(Self {
            a: (value >> 24) as u8,
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }

    /// Convert to [u8; 4] for framebuffer export
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Squared RGB distance, alpha ignored
    pub fn distance_sq(self, other: Color) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Destination origin in VRAM coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Sub-region of a surface used as blit source (a tile)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether integer coordinates `(x, y)` lie inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && (x as i64) < self.x as i64 + self.width as i64
            && (y as i64) < self.y as i64 + self.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_hex() {
        let c = Color::from_argb_hex("FF102030").unwrap();
        assert_eq!(c, Color::with_alpha(0x10, 0x20, 0x30, 0xFF));
        assert_eq!(Color::from_argb_hex("#80FFFFFF").unwrap().a, 0x80);
        assert!(Color::from_argb_hex("FFF").is_none());
        assert!(Color::from_argb_hex("GG000000").is_none());
    }

    #[test]
    fn test_rectangle_contains() {
        let r = Rectangle::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
        assert!(Rectangle::new(0, 0, 0, 5).is_empty());
    }
}
