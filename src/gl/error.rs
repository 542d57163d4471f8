//! Error type for the rasterizer

use super::types::Pixel;

#[derive(Debug)]
pub enum GlError {
    /// VRAM, row table or surface buffer could not be allocated
    Allocation { width: usize, height: usize },
    InvalidIndex(Pixel),
    InvalidColor(String),
    /// Bank cells are empty or larger than the atlas
    InvalidCell { cell_width: usize, cell_height: usize },
    /// Pixel buffer length does not match `width * height`
    SizeMismatch { expected: usize, actual: usize },
    Encoding(image::ImageError),
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<image::ImageError> for GlError {
    fn from(e: image::ImageError) -> Self {
        GlError::Encoding(e)
    }
}

impl From<std::io::Error> for GlError {
    fn from(e: std::io::Error) -> Self {
        GlError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for GlError {
    fn from(e: ron::error::SpannedError) -> Self {
        GlError::ParseError(e)
    }
}

impl From<ron::Error> for GlError {
    fn from(e: ron::Error) -> Self {
        GlError::SerializeError(e)
    }
}

impl std::fmt::Display for GlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlError::Allocation { width, height } => {
                write!(f, "Can't allocate buffer of {}x{}", width, height)
            }
            GlError::InvalidIndex(index) => write!(f, "Color index #{} not available", index),
            GlError::InvalidColor(s) => write!(f, "Invalid ARGB color '{}'", s),
            GlError::InvalidCell { cell_width, cell_height } => {
                write!(f, "Invalid bank cell size {}x{}", cell_width, cell_height)
            }
            GlError::SizeMismatch { expected, actual } => {
                write!(f, "Buffer has {} pixels, expected {}", actual, expected)
            }
            GlError::Encoding(e) => write!(f, "Image error: {}", e),
            GlError::IoError(e) => write!(f, "IO error: {}", e),
            GlError::ParseError(e) => write!(f, "Parse error: {}", e),
            GlError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for GlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlError::Encoding(e) => Some(e),
            GlError::IoError(e) => Some(e),
            GlError::ParseError(e) => Some(e),
            GlError::SerializeError(e) => Some(e),
            _ => None,
        }
    }
}

/// Reserve a `width * height` buffer filled with `fill`, reporting failure
/// instead of aborting.
pub(crate) fn allocate<T: Copy>(width: usize, height: usize, fill: T) -> Result<Vec<T>, GlError> {
    let size = width
        .checked_mul(height)
        .ok_or(GlError::Allocation { width, height })?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| GlError::Allocation { width, height })?;
    buffer.resize(size, fill);
    Ok(buffer)
}

/// Row-start offsets into a `width`-wide buffer of `height` rows
pub(crate) fn row_offsets(width: usize, height: usize) -> Result<Vec<usize>, GlError> {
    let mut rows = Vec::new();
    rows.try_reserve_exact(height)
        .map_err(|_| GlError::Allocation { width, height })?;
    rows.extend((0..height).map(|i| i * width));
    Ok(rows)
}
