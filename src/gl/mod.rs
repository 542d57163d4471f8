//! Palette-indexed software rasterizer
//!
//! Features:
//! - Surfaces of palette indices, never true colors
//! - Shifting table for palette swaps and cycling
//! - Per-index binary transparency
//! - Plain, nearest-neighbour scaled and rotated blits, clipped to VRAM
//! - Mirroring through negative scale factors
//! - Points, lines, rectangles, polygons and circles in one palette index

mod bank;
mod blit;
mod config;
mod context;
mod draw;
mod error;
mod math;
mod palette;
mod surface;
mod types;

pub use bank::*;
pub use config::*;
pub use context::Context;
pub use draw::*;
pub use error::GlError;
pub use math::*;
pub use palette::*;
pub use surface::*;
pub use types::*;

/// Default VRAM dimensions
pub const DEFAULT_WIDTH: usize = 320;
pub const DEFAULT_HEIGHT: usize = 240;
