//! Sprite banks
//!
//! A bank is an atlas surface cut into equally sized cells, numbered
//! row-major from the top-left corner.

use std::path::Path;

use log::warn;

use super::context::Context;
use super::error::GlError;
use super::palette::Palette;
use super::surface::Surface;
use super::types::{Point, Rectangle};

pub struct Bank {
    atlas: Surface,
    cell_width: usize,
    cell_height: usize,
    columns: usize,
    rows: usize,
}

impl Bank {
    pub fn new(atlas: Surface, cell_width: usize, cell_height: usize) -> Result<Self, GlError> {
        if cell_width == 0 || cell_height == 0 || cell_width > atlas.width() || cell_height > atlas.height() {
            return Err(GlError::InvalidCell { cell_width, cell_height });
        }
        let columns = atlas.width() / cell_width;
        let rows = atlas.height() / cell_height;
        Ok(Self { atlas, cell_width, cell_height, columns, rows })
    }

    /// Load an atlas image, indexing it against `palette`
    pub fn load<P: AsRef<Path>>(path: P, cell_width: usize, cell_height: usize, palette: &Palette) -> Result<Self, GlError> {
        let atlas = Surface::load(path, palette)?;
        Self::new(atlas, cell_width, cell_height)
    }

    pub fn atlas(&self) -> &Surface {
        &self.atlas
    }

    pub fn cell_size(&self) -> (usize, usize) {
        (self.cell_width, self.cell_height)
    }

    /// Number of whole cells in the atlas
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atlas rectangle of cell `id`
    pub fn tile(&self, id: usize) -> Option<Rectangle> {
        if id >= self.len() {
            return None;
        }
        let x = (id % self.columns) * self.cell_width;
        let y = (id / self.columns) * self.cell_height;
        Some(Rectangle::new(x as i32, y as i32, self.cell_width as i32, self.cell_height as i32))
    }

    /// Draw cell `id` centered on `position`, which is also the rotation
    /// pivot. The footprint is `|sx| * cell_width x |sy| * cell_height`;
    /// a negative factor mirrors the cell along that axis. The cheapest
    /// blit variant able to honour the arguments is used.
    pub fn sprite(&self, context: &mut Context, id: usize, position: Point, rotation: f32, sx: f32, sy: f32) {
        let Some(tile) = self.tile(id) else {
            warn!("sprite #{} not in bank ({} cells)", id, self.len());
            return;
        };

        let unscaled = sx == 1.0 && sy == 1.0;
        if rotation != 0.0 {
            if unscaled {
                context.blit_rotated(&self.atlas, tile, position, rotation);
            } else {
                context.blit_scaled_rotated(&self.atlas, tile, position, sx, sy, rotation);
            }
            return;
        }

        let width = (sx.abs() * tile.width as f32) as i32;
        let height = (sy.abs() * tile.height as f32) as i32;
        let corner = Point::new(position.x.saturating_sub(width / 2), position.y.saturating_sub(height / 2));
        if unscaled {
            context.blit(&self.atlas, tile, corner);
        } else {
            context.blit_scaled(&self.atlas, tile, corner, sx, sy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::Color;

    const RED: Color = Color::new(255, 0, 0);

    /// 4x2 atlas holding two 2x2 cells: solid 1 and solid 2
    fn bank() -> Bank {
        #[rustfmt::skip]
        let data = vec![
            1, 1, 2, 2,
            1, 1, 2, 2,
        ];
        Bank::new(Surface::from_indexes(4, 2, data).unwrap(), 2, 2).unwrap()
    }

    fn context() -> Context {
        let mut ctx = Context::new(8, 8).unwrap();
        ctx.set_palette(&Palette::from_colors(&[Color::BLACK, Color::WHITE, RED]));
        ctx.clear();
        ctx
    }

    #[test]
    fn test_tiles() {
        let bank = bank();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.tile(0), Some(Rectangle::new(0, 0, 2, 2)));
        assert_eq!(bank.tile(1), Some(Rectangle::new(2, 0, 2, 2)));
        assert_eq!(bank.tile(2), None);
    }

    #[test]
    fn test_invalid_cells() {
        let atlas = Surface::new(4, 4).unwrap();
        assert!(matches!(Bank::new(atlas.clone(), 0, 2), Err(GlError::InvalidCell { .. })));
        assert!(matches!(Bank::new(atlas, 8, 2), Err(GlError::InvalidCell { .. })));
    }

    #[test]
    fn test_sprite_plain_and_scaled() {
        let bank = bank();
        let mut ctx = context();
        // 2x2 cell centered on (1, 1) covers (0..2, 0..2)
        bank.sprite(&mut ctx, 1, Point::new(1, 1), 0.0, 1.0, 1.0);
        assert_eq!(ctx.pixel(0, 0), Some(RED));
        assert_eq!(ctx.pixel(1, 1), Some(RED));
        assert_eq!(ctx.pixel(2, 2), Some(Color::BLACK));

        // 4x4 footprint centered on (6, 6) covers (4..8, 4..8)
        bank.sprite(&mut ctx, 0, Point::new(6, 6), 0.0, 2.0, 2.0);
        assert_eq!(ctx.pixel(4, 4), Some(Color::WHITE));
        assert_eq!(ctx.pixel(7, 7), Some(Color::WHITE));
        assert_eq!(ctx.pixel(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_sprite_rotated_stays_in_footprint() {
        let bank = bank();
        let mut ctx = context();
        bank.sprite(&mut ctx, 0, Point::new(3, 3), std::f32::consts::PI, 1.0, 1.0);
        assert_eq!(ctx.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(ctx.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(ctx.pixel(5, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_sprite_negative_scale_mirrors() {
        let atlas = Surface::from_indexes(2, 1, vec![1, 2]).unwrap();
        let bank = Bank::new(atlas, 2, 1).unwrap();
        let mut ctx = context();

        bank.sprite(&mut ctx, 0, Point::new(1, 0), 0.0, -1.0, 1.0);
        assert_eq!(ctx.pixel(0, 0), Some(RED));
        assert_eq!(ctx.pixel(1, 0), Some(Color::WHITE));

        bank.sprite(&mut ctx, 0, Point::new(2, 2), 0.0, -2.0, 2.0);
        assert_eq!(ctx.pixel(0, 1), Some(RED));
        assert_eq!(ctx.pixel(1, 2), Some(RED));
        assert_eq!(ctx.pixel(2, 1), Some(Color::WHITE));
        assert_eq!(ctx.pixel(3, 2), Some(Color::WHITE));

        // mirrored and rotated still draws inside the footprint
        ctx.clear();
        bank.sprite(&mut ctx, 0, Point::new(4, 4), 0.1, -1.0, 1.0);
        assert!(ctx.vram().iter().any(|&c| c != Color::BLACK));
    }

    #[test]
    fn test_sprite_position_near_i32_max() {
        let bank = bank();
        let mut ctx = context();
        bank.sprite(&mut ctx, 0, Point::new(i32::MAX, 0), 0.5, 1.0, 1.0);
        bank.sprite(&mut ctx, 0, Point::new(i32::MAX, i32::MAX), 0.5, 2.0, 2.0);
        bank.sprite(&mut ctx, 0, Point::new(i32::MIN, i32::MIN), 0.0, 2.0, 2.0);
        bank.sprite(&mut ctx, 0, Point::new(i32::MIN, 0), 0.0, 1.0, 1.0);
        assert!(ctx.vram().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_unknown_sprite_is_ignored() {
        let bank = bank();
        let mut ctx = context();
        bank.sprite(&mut ctx, 9, Point::new(0, 0), 0.0, 1.0, 1.0);
        assert!(ctx.vram().iter().all(|&c| c == Color::BLACK));
    }
}
