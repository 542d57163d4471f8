//! Display configuration
//!
//! Uses RON (Rusty Object Notation) so hosts can ship a human-readable
//! settings file next to their assets.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::error::GlError;
use super::palette;
use super::types::Pixel;
use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// VRAM size in pixels
    pub width: usize,
    pub height: usize,
    /// Window magnification applied by the host
    pub scale: u32,
    /// Id of a predefined palette, greyscale when absent
    pub palette: Option<String>,
    pub background: Pixel,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: 3,
            palette: None,
            background: 0,
        }
    }
}

/// Load a configuration from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DisplayConfig, GlError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a configuration from a RON string
pub fn load_config_from_str(s: &str) -> Result<DisplayConfig, GlError> {
    Ok(ron::from_str(s)?)
}

/// Save a configuration to a RON file
pub fn save_config<P: AsRef<Path>>(config: &DisplayConfig, path: P) -> Result<(), GlError> {
    let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

impl Context {
    /// Allocate a context sized by `config` and apply its palette and
    /// background. Unknown palettes and out-of-range backgrounds are logged
    /// and skipped.
    pub fn from_config(config: &DisplayConfig) -> Result<Self, GlError> {
        let mut context = Context::new(config.width, config.height)?;
        if let Some(id) = &config.palette {
            match palette::predefined(id) {
                Some(p) => context.set_palette(&p),
                None => warn!("unknown predefined palette '{}'", id),
            }
        }
        // already logged, keep the default background
        let _ = context.set_background(config.background);
        Ok(context)
    }
}
