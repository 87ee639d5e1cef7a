//! Software evaluation of the fragment stage over a pixel grid.
//!
//! Derivatives follow the GPU model: pixels are shaded in 2×2 quads and
//! `dFdx` / `dFdy` are differences between neighbours in the same quad.
//! Helper pixels past the right or bottom edge are evaluated but not stored.

use crate::coords::{ColorRgba, Vec2};
use crate::field::DistanceField;
use crate::sdf;

/// Row-major shaded output.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<ColorRgba>,
}

impl ShadedImage {
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> ColorRgba {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn row(&self, y: u32) -> &[ColorRgba] {
        let start = (y * self.width) as usize;
        &self.pixels[start..start + self.width as usize]
    }
}

/// Shades a `width × height` quad whose UVs span the whole field.
pub fn shade_field(field: &DistanceField, color: ColorRgba, width: u32, height: u32) -> ShadedImage {
    let distance = |x: u32, y: u32| {
        let uv = Vec2::new(
            (x as f32 + 0.5) / width as f32,
            (y as f32 + 0.5) / height as f32,
        );
        field.sample(uv)
    };

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let qy = y & !1;
        for x in 0..width {
            let qx = x & !1;
            let d = distance(x, y);
            let dx = distance(qx + 1, y) - distance(qx, y);
            let dy = distance(x, qy + 1) - distance(x, qy);
            pixels.push(sdf::shade(color, d, sdf::fwidth(dx, dy)));
        }
    }

    ShadedImage { width, height, pixels }
}
