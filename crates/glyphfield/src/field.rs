//! CPU copy of a single-channel distance texture.
//!
//! Sampling matches the GPU setup from [`crate::render::linear_clamping_sampler`]:
//! bilinear filtering, clamp-to-edge addressing, texel centers at
//! `(i + 0.5) / size`.

use anyhow::Result;

use crate::coords::Vec2;

/// `R8Unorm` distance field, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    width: u32,
    height: u32,
    texels: Vec<u8>,
}

impl DistanceField {
    pub fn new(width: u32, height: u32, texels: Vec<u8>) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "distance field has zero size");
        anyhow::ensure!(
            texels.len() == width as usize * height as usize,
            "expected {} texels for {width}x{height}, got {}",
            width as usize * height as usize,
            texels.len()
        );
        Ok(Self { width, height, texels })
    }

    /// Builds a field by evaluating `f(x, y)` at every texel.
    ///
    /// Values are clamped to `0..=1` and quantized to bytes, as an upload to
    /// an `R8Unorm` texture would. Fails on a zero-sized field.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Result<Self> {
        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push((f(x, y).clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
        Self::new(width, height, texels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Normalized texel value with clamp-to-edge addressing.
    pub fn texel(&self, x: i64, y: i64) -> f32 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.texels[y * self.width as usize + x] as f32 / 255.0
    }

    /// Bilinear sample of the red channel at `uv`.
    pub fn sample(&self, uv: Vec2) -> f32 {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (ix, iy) = (x0 as i64, y0 as i64);

        let top = lerp(self.texel(ix, iy), self.texel(ix + 1, iy), fx);
        let bottom = lerp(self.texel(ix, iy + 1), self.texel(ix + 1, iy + 1), fx);
        lerp(top, bottom, fy)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
