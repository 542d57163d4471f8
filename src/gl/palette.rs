//! Bounded color palettes
//!
//! A palette holds up to [`PALETTE_MAX`] colors plus the number of entries
//! actually in use. Entries past `count` stay opaque black so lookups through
//! a [`Pixel`] are always in range.

use log::warn;

use super::error::GlError;
use super::types::{Color, Pixel, PALETTE_MAX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub colors: [Color; PALETTE_MAX],
    pub count: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::greyscale(PALETTE_MAX)
    }
}

impl Palette {
    /// Build a palette from a color list, clamping to `PALETTE_MAX` entries
    pub fn from_colors(colors: &[Color]) -> Self {
        let count = if colors.len() > PALETTE_MAX {
            warn!("palette has too many colors ({}), clamping to {}", colors.len(), PALETTE_MAX);
            PALETTE_MAX
        } else {
            colors.len()
        };
        let mut palette = Self {
            colors: [Color::BLACK; PALETTE_MAX],
            count,
        };
        palette.colors[..count].copy_from_slice(&colors[..count]);
        palette
    }

    /// Linear ramp from black to white across `count` entries
    pub fn greyscale(count: usize) -> Self {
        let count = count.min(PALETTE_MAX);
        let mut colors = [Color::BLACK; PALETTE_MAX];
        for (i, color) in colors.iter_mut().enumerate().take(count) {
            let y = if count > 1 { (i * 255 / (count - 1)) as u8 } else { 0 };
            *color = Color::new(y, y, y);
        }
        Self { colors, count }
    }

    /// Parse `AARRGGBB` strings as supplied by scripts
    pub fn from_argb(entries: &[&str]) -> Result<Self, GlError> {
        let colors = entries
            .iter()
            .take(PALETTE_MAX)
            .map(|s| Color::from_argb_hex(s).ok_or_else(|| GlError::InvalidColor(s.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        if entries.len() > PALETTE_MAX {
            warn!("palette has too many colors ({}), clamping to {}", entries.len(), PALETTE_MAX);
        }
        Ok(Self::from_colors(&colors))
    }

    /// Color at `index`, or `None` past the palette size
    pub fn get(&self, index: Pixel) -> Option<Color> {
        let index = index as usize;
        (index < self.count).then(|| self.colors[index])
    }

    pub fn contains(&self, index: Pixel) -> bool {
        (index as usize) < self.count
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors[..self.count]
    }

    /// Index of the closest color (exact matches win immediately)
    pub fn nearest(&self, color: Color) -> Pixel {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (i, entry) in self.as_slice().iter().enumerate() {
            let distance = entry.distance_sq(color);
            if distance < best_distance {
                best = i;
                best_distance = distance;
                if distance == 0 {
                    break;
                }
            }
        }
        best as Pixel
    }
}

const PICO_8: [u32; 16] = [
    0x000000, 0x1D2B53, 0x7E2553, 0x008751, 0xAB5236, 0x5F574F, 0xC2C3C7, 0xFFF1E8,
    0xFF004D, 0xFFA300, 0xFFEC27, 0x00E436, 0x29ADFF, 0x83769C, 0xFF77A8, 0xFFCCAA,
];

const GAMEBOY: [u32; 4] = [0x0F380F, 0x306230, 0x8BAC0F, 0x9BBC0F];

const CGA: [u32; 16] = [
    0x000000, 0x0000AA, 0x00AA00, 0x00AAAA, 0xAA0000, 0xAA00AA, 0xAA5500, 0xAAAAAA,
    0x555555, 0x5555FF, 0x55FF55, 0x55FFFF, 0xFF5555, 0xFF55FF, 0xFFFF55, 0xFFFFFF,
];

const PREDEFINED: &[(&str, &[u32])] = &[("pico-8", &PICO_8), ("gameboy", &GAMEBOY), ("cga", &CGA)];

/// Look up one of the built-in palettes by id
pub fn predefined(id: &str) -> Option<Palette> {
    PREDEFINED
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, rgbs)| {
            let colors: Vec<Color> = rgbs.iter().map(|&rgb| Color::from_rgb(rgb)).collect();
            Palette::from_colors(&colors)
        })
}

/// Ids of the built-in palettes
pub fn predefined_ids() -> impl Iterator<Item = &'static str> {
    PREDEFINED.iter().map(|(name, _)| *name)
}
