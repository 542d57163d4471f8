//! Blit primitives: 1:1 copy, nearest-neighbour scaling and rotation
//!
//! Every variant reads source indices from a [`Surface`], pushes them
//! through shifting, transparency and palette lookups, and writes the
//! resulting colors into the context VRAM. Transparent pixels leave the
//! destination untouched.
//!
//! Scaled and rotated variants are destination-driven: they walk the output
//! area and compute the source texel for each pixel, so magnification and
//! rotation never leave holes.
//!
//! All variants clip against both the surface and the VRAM; anything
//! outside either buffer is simply not drawn.

use log::debug;

use super::context::Context;
use super::math::sin_cos;
use super::surface::Surface;
use super::types::{Point, Rectangle};

/// Clip a span of `len` cells starting at `src` in the source and `dst` in
/// the destination. Returns `(src_start, dst_start, len)` of the visible part.
fn clip_span(src: i32, dst: i32, len: i32, src_limit: usize, dst_limit: usize) -> Option<(usize, usize, usize)> {
    let (src, dst, len) = (src as i64, dst as i64, len as i64);
    let lo = 0i64.max(-src).max(-dst);
    let hi = len.min(src_limit as i64 - src).min(dst_limit as i64 - dst);
    (lo < hi).then(|| ((src + lo) as usize, (dst + lo) as usize, (hi - lo) as usize))
}

/// Offsets in `[0, len)` whose destination `origin + offset` is inside `[0, limit)`
fn visible_range(origin: i64, len: i64, limit: usize) -> std::ops::Range<i64> {
    let lo = 0i64.max(-origin);
    let hi = len.min(limit as i64 - origin);
    lo..hi.max(lo)
}

/// Finite and non-zero; the sign only selects mirroring
fn valid_scale(sx: f32, sy: f32) -> bool {
    sx.is_finite() && sy.is_finite() && sx != 0.0 && sy != 0.0
}

/// Tile-local texel `local` along an axis of `len` texels, mirrored when
/// `flip` is set. `None` when it falls outside the tile.
#[inline]
fn local_texel(local: i64, len: i32, flip: bool) -> Option<i64> {
    let len = len as i64;
    if local < 0 || local >= len {
        return None;
    }
    Some(if flip { len - 1 - local } else { local })
}

/// Absolute source coordinate, `None` outside `[0, limit)`
#[inline]
fn source_index(origin: i32, local: i64, limit: usize) -> Option<usize> {
    let at = origin as i64 + local;
    (at >= 0 && at < limit as i64).then_some(at as usize)
}

impl Context {
    /// Copy `tile` from `surface` to `position` without scaling.
    pub fn blit(&mut self, surface: &Surface, tile: Rectangle, position: Point) {
        let Some((src_x, dst_x, width)) = clip_span(tile.x, position.x, tile.width, surface.width(), self.width())
        else {
            return;
        };
        let Some((src_y, dst_y, height)) = clip_span(tile.y, position.y, tile.height, surface.height(), self.height())
        else {
            return;
        };

        let (pipeline, mut target) = self.split();
        for i in 0..height {
            let src = &surface.row(src_y + i)[src_x..src_x + width];
            let dst = &mut target.row_mut(dst_y + i)[dst_x..dst_x + width];
            for (d, &s) in dst.iter_mut().zip(src) {
                if let Some(color) = pipeline.resolve(s) {
                    *d = color;
                }
            }
        }
    }

    /// Nearest-neighbour scaled copy with independent `sx`/`sy` factors.
    /// The output covers `floor(|sx| * tile.width) x floor(|sy| * tile.height)`
    /// pixels with `position` as its top-left corner. A negative factor
    /// mirrors the tile along that axis.
    pub fn blit_scaled(&mut self, surface: &Surface, tile: Rectangle, position: Point, sx: f32, sy: f32) {
        if !valid_scale(sx, sy) {
            debug!("ignoring scaled blit with factors {}x{}", sx, sy);
            return;
        }
        if tile.is_empty() {
            return;
        }

        let (flip_x, flip_y) = (sx < 0.0, sy < 0.0);
        let (sx, sy) = (sx.abs(), sy.abs());
        let width = (sx * tile.width as f32) as i64;
        let height = (sy * tile.height as f32) as i64;
        let du = 1.0 / sx;
        let dv = 1.0 / sy;

        let columns = visible_range(position.x as i64, width, self.width());
        let rows = visible_range(position.y as i64, height, self.height());

        let (pipeline, mut target) = self.split();
        for i in rows {
            let local = ((i as f32 * dv) as i64).min(tile.height as i64 - 1);
            let Some(v) = local_texel(local, tile.height, flip_y).and_then(|v| source_index(tile.y, v, surface.height()))
            else {
                continue;
            };
            let src = surface.row(v);
            let dst = target.row_mut((position.y as i64 + i) as usize);

            for j in columns.clone() {
                let local = ((j as f32 * du) as i64).min(tile.width as i64 - 1);
                let Some(u) = local_texel(local, tile.width, flip_x).and_then(|u| source_index(tile.x, u, surface.width()))
                else {
                    continue;
                };
                if let Some(color) = pipeline.resolve(src[u]) {
                    dst[(position.x as i64 + j) as usize] = color;
                }
            }
        }
    }

    /// Rotate `tile` by `rotation` radians (counter-clockwise) around
    /// `center`. Destination pixels whose inverse-rotated source falls
    /// outside the tile are left untouched.
    pub fn blit_rotated(&mut self, surface: &Surface, tile: Rectangle, center: Point, rotation: f32) {
        if !rotation.is_finite() || tile.is_empty() {
            return;
        }

        let (s, c) = sin_cos(rotation);
        let hw = (tile.width / 2) as f32;
        let hh = (tile.height / 2) as f32;

        let size = (tile.width as i64, tile.height as i64);
        self.blit_mapped(surface, tile, center, size, (false, false), |x, y| {
            (x * c + y * s + hw, y * c - x * s + hh)
        });
    }

    /// Scale then rotate: the `floor(|sx| * w) x floor(|sy| * h)` box
    /// centered on `center` is mapped back through the inverse rotation and
    /// the inverse scale into the tile. Negative factors mirror the tile
    /// before it is rotated.
    pub fn blit_scaled_rotated(
        &mut self,
        surface: &Surface,
        tile: Rectangle,
        center: Point,
        sx: f32,
        sy: f32,
        rotation: f32,
    ) {
        if !valid_scale(sx, sy) || !rotation.is_finite() {
            debug!("ignoring scaled/rotated blit with factors {}x{} and rotation {}", sx, sy, rotation);
            return;
        }
        if tile.is_empty() {
            return;
        }

        let flip = (sx < 0.0, sy < 0.0);
        let (sx, sy) = (sx.abs(), sy.abs());
        let (s, c) = sin_cos(rotation);
        let hw = tile.width as f32 / 2.0;
        let hh = tile.height as f32 / 2.0;
        let size = ((sx * tile.width as f32) as i64, (sy * tile.height as f32) as i64);

        self.blit_mapped(surface, tile, center, size, flip, |x, y| {
            let rx = x * c + y * s;
            let ry = y * c - x * s;
            (rx / sx + hw, ry / sy + hh)
        });
    }

    /// Walk a `size` box centered on `center`, map each offset from the
    /// center to tile-local coordinates with `map`, mirror them per `flip`
    /// and draw the texels that land inside both the tile and the surface.
    fn blit_mapped<F>(
        &mut self,
        surface: &Surface,
        tile: Rectangle,
        center: Point,
        size: (i64, i64),
        flip: (bool, bool),
        map: F,
    ) where
        F: Fn(f32, f32) -> (f32, f32),
    {
        let (width, height) = size;
        let hw = width / 2;
        let hh = height / 2;
        let left = center.x as i64 - hw;
        let top = center.y as i64 - hh;

        let columns = visible_range(left, width, self.width());
        let rows = visible_range(top, height, self.height());

        let (pipeline, mut target) = self.split();
        for i in rows {
            let y = (i - hh) as f32;
            let dst = target.row_mut((top + i) as usize);

            for j in columns.clone() {
                let x = (j - hw) as f32;
                let (u, v) = map(x, y);

                let Some(u) = local_texel(u.floor() as i64, tile.width, flip.0) else {
                    continue;
                };
                let Some(v) = local_texel(v.floor() as i64, tile.height, flip.1) else {
                    continue;
                };
                let (Some(src_x), Some(src_y)) =
                    (source_index(tile.x, u, surface.width()), source_index(tile.y, v, surface.height()))
                else {
                    continue;
                };
                if let Some(color) = pipeline.resolve(surface.row(src_y)[src_x]) {
                    dst[(left + j) as usize] = color;
                }
            }
        }
    }
}
