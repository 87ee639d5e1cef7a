//! Distance-field alpha mapping, the CPU counterpart of `fs_sdf`.
//!
//! Convention:
//! - the red channel holds the distance value `d`
//! - `d == EDGE` is the contour; above it is treated as inside
//! - the anti-aliasing band is `EDGE ± aaf`, where `aaf` is the screen-space
//!   rate of change of `d` (`fwidth`)

use crate::coords::ColorRgba;

/// Distance value of the glyph contour.
pub const EDGE: f32 = 0.5;

/// Cubic Hermite step with GLSL/WGSL semantics.
///
/// Callers must pass `edge0 < edge1`; the shading functions below handle the
/// degenerate band themselves.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Sum of absolute screen-space partial derivatives.
#[inline]
pub fn fwidth(dx: f32, dy: f32) -> f32 {
    dx.abs() + dy.abs()
}

/// Maps a distance sample to alpha over the band `EDGE ± aaf`.
///
/// A zero band is the limit of the smooth mapping: a hard step at `EDGE`.
#[inline]
pub fn coverage(d: f32, aaf: f32) -> f32 {
    if aaf <= 0.0 {
        return if d >= EDGE { 1.0 } else { 0.0 };
    }
    smoothstep(EDGE - aaf, EDGE + aaf, d)
}

/// Fragment output of the SDF stage: vertex RGB with computed alpha.
///
/// The incoming vertex alpha is not consulted.
#[inline]
pub fn shade(color: ColorRgba, d: f32, aaf: f32) -> ColorRgba {
    color.with_alpha(coverage(d, aaf))
}

/// Fragment output of the solid stage: the interpolated vertex color.
#[inline]
pub fn shade_solid(color: ColorRgba) -> ColorRgba {
    color
}
