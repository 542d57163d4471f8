//! Drawing primitives: points, lines, rectangles, polygons and circles
//!
//! Primitives paint a single palette index. The index goes through the
//! shifting table and the palette like a blitted pixel, but the
//! transparency table is not consulted: drawing index 0 paints color 0.
//! Everything is clipped to VRAM.

use log::debug;
use serde::{Deserialize, Serialize};

use super::context::{Context, Target};
use super::types::{Color, Pixel, Point, Rectangle};

/// How closed shapes are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Interior and border
    Fill,
    /// One-pixel outline
    Line,
}

/// Largest `a` with `a * a <= n`, `-1` when `n` is negative
fn isqrt(n: i64) -> i64 {
    if n < 0 {
        return -1;
    }
    let mut a = (n as f64).sqrt() as i64;
    while a * a > n {
        a -= 1;
    }
    while (a + 1) * (a + 1) <= n {
        a += 1;
    }
    a
}

/// Clip a segment to `[0, width) x [0, height)`. Segments fully inside are
/// returned untouched so Bresenham walks the exact endpoints.
fn clip_line(from: Point, to: Point, width: usize, height: usize) -> Option<(i64, i64, i64, i64)> {
    let (x0, y0, x1, y1) = (from.x as i64, from.y as i64, to.x as i64, to.y as i64);
    let right = width as i64 - 1;
    let bottom = height as i64 - 1;
    let inside = |x: i64, y: i64| x >= 0 && y >= 0 && x <= right && y <= bottom;
    if inside(x0, y0) && inside(x1, y1) {
        return Some((x0, y0, x1, y1));
    }

    // Liang-Barsky
    let dx = (x1 - x0) as f64;
    let dy = (y1 - y0) as f64;
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let edges = [
        (-dx, x0 as f64),
        (dx, (right - x0) as f64),
        (-dy, y0 as f64),
        (dy, (bottom - y0) as f64),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }

    let at = |t: f64| ((x0 as f64 + t * dx).round() as i64, (y0 as f64 + t * dy).round() as i64);
    let (a, b) = (at(t0), at(t1));
    Some((a.0, a.1, b.0, b.1))
}

/// Bresenham segment, both endpoints included
fn stroke(target: &mut Target<'_>, from: Point, to: Point, color: Color) {
    let Some((x0, y0, x1, y1)) = clip_line(from, to, target.width(), target.height()) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        target.plot(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Even-odd scanline fill sampling pixel centers. The outline is closed
/// implicitly from the last vertex back to the first.
fn fill_polygon(target: &mut Target<'_>, vertices: &[Point], color: Color) {
    let (min_y, max_y) = vertices
        .iter()
        .fold((i64::MAX, i64::MIN), |(lo, hi), p| (lo.min(p.y as i64), hi.max(p.y as i64)));
    let top = min_y.max(0);
    let bottom = max_y.min(target.height() as i64);

    let mut crossings: Vec<f64> = Vec::with_capacity(vertices.len());
    for y in top..bottom {
        let center = y as f64 + 0.5;
        crossings.clear();
        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            if (ay <= center) != (by <= center) {
                let t = (center - ay) / (by - ay);
                crossings.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x0 = (pair[0] - 0.5).ceil() as i64;
            let x1 = (pair[1] - 0.5).ceil() as i64 - 1;
            target.span(y, x0, x1, color);
        }
    }
}

impl Context {
    /// Paint the pixel at `position`
    pub fn point(&mut self, position: Point, index: Pixel) {
        let (pipeline, mut target) = self.split();
        let color = pipeline.ink(index);
        target.plot(position.x as i64, position.y as i64, color);
    }

    /// Straight segment from `from` to `to`, both ends included
    pub fn line(&mut self, from: Point, to: Point, index: Pixel) {
        let (pipeline, mut target) = self.split();
        let color = pipeline.ink(index);
        stroke(&mut target, from, to, color);
    }

    /// Axis-aligned box. The outline covers the same border pixels the
    /// filled box does.
    pub fn rectangle(&mut self, mode: DrawMode, area: Rectangle, index: Pixel) {
        if area.is_empty() {
            return;
        }

        let (pipeline, mut target) = self.split();
        let color = pipeline.ink(index);
        let (left, top) = (area.x as i64, area.y as i64);
        let right = left + area.width as i64 - 1;
        let bottom = top + area.height as i64 - 1;

        for y in top.max(0)..=bottom.min(target.height() as i64 - 1) {
            if mode == DrawMode::Fill || y == top || y == bottom {
                target.span(y, left, right, color);
            } else {
                target.plot(left, y, color);
                target.plot(right, y, color);
            }
        }
    }

    /// `Line` joins consecutive vertices (repeat the first vertex to close
    /// the outline). `Fill` closes the shape itself and needs three
    /// vertices or more.
    pub fn polygon(&mut self, mode: DrawMode, vertices: &[Point], index: Pixel) {
        if vertices.is_empty() {
            debug!("polygon has no vertices");
            return;
        }

        let (pipeline, mut target) = self.split();
        let color = pipeline.ink(index);
        match mode {
            DrawMode::Line => {
                if let [only] = vertices {
                    target.plot(only.x as i64, only.y as i64, color);
                }
                for pair in vertices.windows(2) {
                    stroke(&mut target, pair[0], pair[1], color);
                }
            }
            DrawMode::Fill if vertices.len() >= 3 => fill_polygon(&mut target, vertices, color),
            DrawMode::Fill => debug!("can't fill polygon with {} vertices", vertices.len()),
        }
    }

    /// Circle of the pixels whose offset from `center` satisfies
    /// `dx * dx + dy * dy <= radius * radius`. `Line` keeps the ones with a
    /// 4-neighbour outside that disc. Negative radii draw nothing.
    pub fn circle(&mut self, mode: DrawMode, center: Point, radius: i32, index: Pixel) {
        if radius < 0 {
            return;
        }

        let (pipeline, mut target) = self.split();
        let color = pipeline.ink(index);
        let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
        // half-width of the disc on row `dy`, -1 past the top and bottom
        let half = |dy: i64| if dy.abs() <= r { isqrt(r * r - dy * dy) } else { -1 };

        for y in (cy - r).max(0)..=(cy + r).min(target.height() as i64 - 1) {
            let dy = y - cy;
            let outer = half(dy);
            match mode {
                DrawMode::Fill => target.span(y, cx - outer, cx + outer, color),
                DrawMode::Line => {
                    let inner = (half(dy - 1).min(half(dy + 1)) + 1).min(outer);
                    target.span(y, cx - outer, cx - inner, color);
                    target.span(y, cx + inner, cx + outer, color);
                }
            }
        }
    }
}
