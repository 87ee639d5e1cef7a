use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, Vec2};

/// Vertex layout shared by every program (32 bytes):
///
///  offset  0  pos    [f32; 2]   loc 0
///  offset  8  color  [f32; 4]   loc 1
///  offset 24  uv     [f32; 2]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4, // color
        2 => Float32x2  // uv
    ];

    #[inline]
    pub fn new(pos: Vec2, color: ColorRgba, uv: Vec2) -> Self {
        Self { pos: pos.to_array(), color: color.to_array(), uv: uv.to_array() }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Two triangles covering the rect at `pos` with extent `size`, textured
    /// with the atlas region at `uv_pos` / `uv_size`.
    ///
    /// Negative sizes are allowed; glyph quads use a negative height to flip
    /// from bitmap rows (+Y down) to world space (+Y up).
    pub fn image_rect(
        pos: Vec2,
        size: Vec2,
        uv_pos: Vec2,
        uv_size: Vec2,
        color: ColorRgba,
    ) -> [Vertex; 6] {
        let corner = |fx: f32, fy: f32| {
            Vertex::new(
                Vec2::new(pos.x + size.x * fx, pos.y + size.y * fy),
                color,
                Vec2::new(uv_pos.x + uv_size.x * fx, uv_pos.y + uv_size.y * fy),
            )
        };
        let (v0, v1, v2, v3) = (corner(0.0, 0.0), corner(1.0, 0.0), corner(0.0, 1.0), corner(1.0, 1.0));
        [v0, v1, v2, v1, v2, v3]
    }

    /// Untextured rect for the solid program.
    pub fn solid_rect(pos: Vec2, size: Vec2, color: ColorRgba) -> [Vertex; 6] {
        Self::image_rect(pos, size, Vec2::zero(), Vec2::zero(), color)
    }
}
