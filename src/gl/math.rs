//! Trigonometry helpers for rotated blits

/// Snap values within `f32::EPSILON` of 0, 1 or -1 to the exact value.
/// Keeps quarter-turn rotations from sampling a neighbouring texel because
/// of `cos(PI / 2) = -4.37e-8` style residue.
pub fn snap_unit(value: f32) -> f32 {
    if value.abs() <= f32::EPSILON {
        0.0
    } else if (value - 1.0).abs() <= f32::EPSILON {
        1.0
    } else if (value + 1.0).abs() <= f32::EPSILON {
        -1.0
    } else {
        value
    }
}

/// Snapped `(sin, cos)` of an angle in radians
pub fn sin_cos(angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (snap_unit(s), snap_unit(c))
}
