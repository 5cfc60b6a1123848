//! Disk → sphere coordinate functions.
//!
//! The backward transform takes a point of the unit disk to the upper
//! half-sphere as (λ, φ). It extends to the whole square [-1, 1]² by folding
//! the radius, which only matters for points that are masked out anyway.

use std::f32::consts::PI;

use crate::consts::{LATITUDE_RADIUS_SCALE, SPEEDUP_STEEPNESS};

/// Soft-sign kernel `g(t) = (e^t - 1) / (e^t + 1) * t`.
#[inline]
pub fn speedup_kernel(t: f32) -> f32 {
    let et = t.exp();
    (et - 1.0) / (et + 1.0) * t
}

/// Monotone warp of [0, 1] onto itself with `speedup(0) = 0`, `speedup(1) = 1`.
///
/// Spreads the band just above the equator over more output pixels at the
/// expense of detail near the pole.
#[inline]
pub fn speedup(t: f32) -> f32 {
    let s = SPEEDUP_STEEPNESS;
    speedup_kernel(speedup_kernel(s * t)) / speedup_kernel(speedup_kernel(s))
}

/// Longitude of the disk point `(x, y)`, in (−π, π].
///
/// Singular at the center and discontinuous across the negative x axis;
/// the discontinuity lands on the seam of the equirectangular source.
#[inline]
pub fn ortho_to_longitude(x: f32, y: f32) -> f32 {
    (-y).atan2(x)
}

/// Polar angle of the disk point `(x, y)`, in [0, π/2].
///
/// Radii beyond 1 fold back into [0, 1) instead of saturating.
#[inline]
pub fn ortho_to_latitude(x: f32, y: f32) -> f32 {
    let r = x.hypot(y);
    (r - r.trunc()).acos()
}

/// Source column for the disk point `(x, y)` in a source `width` pixels wide.
#[inline]
pub fn longitude_sample(x: f32, y: f32, width: f32) -> f32 {
    (ortho_to_longitude(x, y) / PI + 1.0) * 0.5 * width
}

/// Source row for the disk point `(x, y)` in a source `height` pixels tall.
#[inline]
pub fn latitude_sample(x: f32, y: f32, height: f32) -> f32 {
    let phi = ortho_to_latitude(x * LATITUDE_RADIUS_SCALE, y * LATITUDE_RADIUS_SCALE);
    height * (1.0 - speedup(phi / PI + 0.5))
}
