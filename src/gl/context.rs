//! Rendering context: VRAM plus palette, shifting, transparency and background state

use std::path::Path;

use log::{debug, error, warn};

use super::error::{allocate, row_offsets, GlError};
use super::palette::Palette;
use super::types::{Color, Pixel, PALETTE_MAX};

/// Destination frame buffer and the color pipeline state applied by blits.
///
/// Pixels drawn into VRAM go through three lookups: the shifting table remaps
/// the source index, the transparency table decides whether the write happens
/// at all, and the palette turns the remapped index into a color.
pub struct Context {
    width: usize,
    height: usize,
    stride: usize,
    vram: Vec<Color>,
    vram_rows: Vec<usize>,
    palette: Palette,
    shifting: [Pixel; PALETTE_MAX],
    transparent: [bool; PALETTE_MAX],
    background: Pixel,
}

/// Read-only view of the lookup tables, borrowed alongside mutable VRAM
pub(super) struct Pipeline<'a> {
    shifting: &'a [Pixel; PALETTE_MAX],
    transparent: &'a [bool; PALETTE_MAX],
    colors: &'a [Color; PALETTE_MAX],
}

impl Pipeline<'_> {
    /// Color to write for a source index, `None` when it's transparent
    #[inline]
    pub fn resolve(&self, pixel: Pixel) -> Option<Color> {
        let index = self.shifting[pixel as usize] as usize;
        if self.transparent[index] {
            None
        } else {
            Some(self.colors[index])
        }
    }

    /// Color of a drawing index: shifted, never transparent
    #[inline]
    pub fn ink(&self, pixel: Pixel) -> Color {
        self.colors[self.shifting[pixel as usize] as usize]
    }
}

/// Mutable view of VRAM rows
pub(super) struct Target<'a> {
    width: usize,
    vram: &'a mut [Color],
    rows: &'a [usize],
}

impl Target<'_> {
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Color] {
        let start = self.rows[y];
        &mut self.vram[start..start + self.width]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Write one pixel, ignored outside VRAM
    #[inline]
    pub fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height() as i64 {
            self.row_mut(y as usize)[x as usize] = color;
        }
    }

    /// Fill `x0..=x1` on row `y`, clamped to VRAM
    pub fn span(&mut self, y: i64, x0: i64, x1: i64, color: Color) {
        if y < 0 || y >= self.height() as i64 {
            return;
        }
        let lo = x0.max(0);
        let hi = x1.min(self.width as i64 - 1);
        if lo > hi {
            return;
        }
        self.row_mut(y as usize)[lo as usize..=hi as usize].fill(color);
    }
}

fn identity_shifting() -> [Pixel; PALETTE_MAX] {
    std::array::from_fn(|i| i as Pixel)
}

fn default_transparency() -> [bool; PALETTE_MAX] {
    let mut transparent = [false; PALETTE_MAX];
    transparent[0] = true;
    transparent
}

impl Context {
    /// Allocate VRAM and its row table. Shifting starts as identity, only
    /// index 0 is transparent and the palette is a full greyscale ramp.
    pub fn new(width: usize, height: usize) -> Result<Self, GlError> {
        let vram = allocate(width, height, Color::BLACK).map_err(|e| {
            error!("can't allocate VRAM buffer ({}x{})", width, height);
            e
        })?;
        let vram_rows = row_offsets(width, height).map_err(|e| {
            error!("can't allocate VRAM row table ({} rows)", height);
            e
        })?;
        debug!("VRAM allocated ({}x{})", width, height);

        let palette = Palette::greyscale(PALETTE_MAX);
        debug!("calculated greyscale palette of {} entries", palette.count);

        Ok(Self {
            width,
            height,
            stride: width * std::mem::size_of::<Color>(),
            vram,
            vram_rows,
            palette,
            shifting: identity_shifting(),
            transparent: default_transparency(),
            background: 0,
        })
    }

    /// Release VRAM. Dropping the context does the same; this only makes the
    /// end of the lifecycle explicit at call sites.
    pub fn terminate(self) {
        drop(self);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per VRAM row
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn vram(&self) -> &[Color] {
        &self.vram
    }

    /// VRAM row `y`, `None` past the last row
    pub fn row(&self, y: usize) -> Option<&[Color]> {
        let start = *self.vram_rows.get(y)?;
        self.vram.get(start..start + self.width)
    }

    /// Color at `(x, y)`, `None` outside VRAM
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.row(y)?.get(x).copied()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn shifting(&self) -> &[Pixel; PALETTE_MAX] {
        &self.shifting
    }

    pub fn transparency(&self) -> &[bool; PALETTE_MAX] {
        &self.transparent
    }

    pub fn background(&self) -> Pixel {
        self.background
    }

    pub(super) fn split(&mut self) -> (Pipeline<'_>, Target<'_>) {
        (
            Pipeline {
                shifting: &self.shifting,
                transparent: &self.transparent,
                colors: &self.palette.colors,
            },
            Target {
                width: self.width,
                vram: &mut self.vram,
                rows: &self.vram_rows,
            },
        )
    }

    /// Fill VRAM with the background color
    pub fn clear(&mut self) {
        let color = self.palette.colors[self.background as usize];
        self.vram.fill(color);
    }

    /// VRAM as packed RGBA bytes, row-major
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.vram.iter().flat_map(|c| c.to_bytes()).collect()
    }

    /// Write VRAM to a PNG file. Failures are logged and reported as `false`.
    pub fn screenshot<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        let result = image::save_buffer_with_format(
            path,
            &self.to_rgba_bytes(),
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        );
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("can't save screenshot to '{}': {}", path.display(), e);
                false
            }
        }
    }

    /// Replace the active palette. Indices already in use are not checked
    /// against the new size.
    pub fn set_palette(&mut self, palette: &Palette) {
        self.palette = palette.clone();
        debug!("palette updated ({} colors)", palette.count);
    }

    /// `None` resets the shifting table to identity. A mapping only patches
    /// the listed `(from, to)` entries and leaves every other entry as it
    /// was, so successive calls accumulate (palette cycling relies on this).
    pub fn set_shifting(&mut self, mapping: Option<&[(Pixel, Pixel)]>) {
        match mapping {
            None => self.shifting = identity_shifting(),
            Some(pairs) => {
                for &(from, to) in pairs {
                    self.shifting[from as usize] = to;
                }
            }
        }
    }

    /// `None` restores the default (only index 0 transparent). A mapping
    /// patches the listed `(index, transparent)` entries only.
    pub fn set_transparency(&mut self, mapping: Option<&[(Pixel, bool)]>) {
        match mapping {
            None => self.transparent = default_transparency(),
            Some(pairs) => {
                for &(index, transparent) in pairs {
                    self.transparent[index as usize] = transparent;
                }
            }
        }
    }

    /// Select the background index used by [`Context::clear`]. Indices past
    /// the palette size are rejected and the previous background kept.
    pub fn set_background(&mut self, index: Pixel) -> Result<(), GlError> {
        if !self.palette.contains(index) {
            warn!("color index #{} not available in current palette", index);
            return Err(GlError::InvalidIndex(index));
        }
        self.background = index;
        Ok(())
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        debug!("context deallocated ({}x{})", self.width, self.height);
    }
}
