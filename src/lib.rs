//! Tofu GL: indexed-color software rasterizer
//!
//! Composites palette-indexed sprites and tiles into a linear RGBA frame
//! buffer. The host owns the window, timing and asset loading; this crate
//! only turns surfaces and palette state into VRAM colors.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod gl;
