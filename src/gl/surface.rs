//! Indexed source images
//!
//! A surface is a grid of palette indices with a row-offset table computed
//! once at creation. It is never mutated after construction.

use std::path::Path;

use super::error::{allocate, row_offsets, GlError};
use super::palette::Palette;
use super::types::{Color, Pixel, Rectangle};

#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
    rows: Vec<usize>,
}

impl Surface {
    /// Blank surface, every pixel at index 0
    pub fn new(width: usize, height: usize) -> Result<Self, GlError> {
        let data = allocate(width, height, 0)?;
        let rows = row_offsets(width, height)?;
        Ok(Self { width, height, data, rows })
    }

    /// Wrap an already-indexed buffer
    pub fn from_indexes(width: usize, height: usize, data: Vec<Pixel>) -> Result<Self, GlError> {
        let expected = width
            .checked_mul(height)
            .ok_or(GlError::Allocation { width, height })?;
        if data.len() != expected {
            return Err(GlError::SizeMismatch { expected, actual: data.len() });
        }
        let rows = row_offsets(width, height)?;
        Ok(Self { width, height, data, rows })
    }

    /// Convert 8-bit RGBA data by matching each pixel against `palette`.
    /// Fully transparent pixels become index 0.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8], palette: &Palette) -> Result<Self, GlError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(GlError::Allocation { width, height })?;
        if rgba.len() != expected {
            return Err(GlError::SizeMismatch { expected: expected / 4, actual: rgba.len() / 4 });
        }

        let mut data = allocate(width, height, 0)?;
        for (index, p) in data.iter_mut().zip(rgba.chunks_exact(4)) {
            *index = if p[3] == 0 {
                0
            } else {
                palette.nearest(Color::with_alpha(p[0], p[1], p[2], p[3]))
            };
        }
        let rows = row_offsets(width, height)?;
        Ok(Self { width, height, data, rows })
    }

    /// Decode an image file and index it against `palette`
    pub fn load<P: AsRef<Path>>(path: P, palette: &Palette) -> Result<Self, GlError> {
        let img = image::open(path.as_ref())?;
        Self::from_image(&img, palette)
    }

    /// Decode in-memory image bytes (PNG, BMP, JPEG) and index them
    pub fn from_bytes(bytes: &[u8], palette: &Palette) -> Result<Self, GlError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(&img, palette)
    }

    fn from_image(img: &image::DynamicImage, palette: &Palette) -> Result<Self, GlError> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width as usize, height as usize, rgba.as_raw(), palette)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The whole surface as a tile
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    /// Row `y` as a slice of `width` pixels. Callers check `y < height`.
    pub(crate) fn row(&self, y: usize) -> &[Pixel] {
        let start = self.rows[y];
        &self.data[start..start + self.width]
    }

    /// Pixel at `(x, y)`, `None` outside the surface
    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        Some(self.row(y as usize)[x as usize])
    }
}
