//! 2D vertex projection, the CPU counterpart of `vs_plain` / `vs_camera`.
//!
//! Both variants produce `vec4(xy, 0.0, 1.0)`: there is no depth and no
//! perspective divide. Positions are pixel/world units with the origin at the
//! viewport center, so `resolution / 2` lands on the NDC corner `(1, 1)`.

use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, Resolution, Vec2};
use crate::render::Vertex;

/// Which vertex entry point a program uses.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ProjectionKind {
    /// Screen-anchored geometry (status bars, overlays).
    Plain,
    /// Geometry panned and zoomed by a camera.
    #[default]
    Camera,
}

impl ProjectionKind {
    /// WGSL vertex entry point.
    pub const fn entry_point(self) -> &'static str {
        match self {
            ProjectionKind::Plain => "vs_plain",
            ProjectionKind::Camera => "vs_camera",
        }
    }

    /// Uniforms a GL program of this kind must expose.
    pub const fn uniform_names(self) -> &'static [&'static str] {
        match self {
            ProjectionKind::Plain => &["resolution"],
            ProjectionKind::Camera => &["resolution", "camera_pos", "camera_scale"],
        }
    }
}

/// Per-draw projection parameters.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Projection {
    #[default]
    Plain,
    Camera { pos: Vec2, scale: f32 },
}

impl Projection {
    #[inline]
    pub const fn camera(pos: Vec2, scale: f32) -> Self {
        Projection::Camera { pos, scale }
    }

    pub const fn kind(&self) -> ProjectionKind {
        match self {
            Projection::Plain => ProjectionKind::Plain,
            Projection::Camera { .. } => ProjectionKind::Camera,
        }
    }

    /// Camera offset and zoom; the plain variant is the identity camera.
    #[inline]
    pub const fn camera_params(&self) -> (Vec2, f32) {
        match *self {
            Projection::Plain => (Vec2::zero(), 1.0),
            Projection::Camera { pos, scale } => (pos, scale),
        }
    }

    /// Clip-space position of `position`.
    ///
    /// The division by `resolution` is unguarded, as in the shader.
    #[inline]
    pub fn project(&self, position: Vec2, resolution: Resolution) -> [f32; 4] {
        let res = resolution.as_vec2();
        let xy = match *self {
            Projection::Plain => 2.0 * position / res,
            Projection::Camera { pos, scale } => 2.0 * (position - pos) * scale / res,
        };
        [xy.x, xy.y, 0.0, 1.0]
    }

    /// Runs the vertex stage for one vertex.
    pub fn transform(&self, vertex: &Vertex, resolution: Resolution) -> VertexOutput {
        VertexOutput {
            clip: self.project(vertex.pos.into(), resolution),
            color: vertex.color.into(),
            uv: vertex.uv.into(),
        }
    }

    /// Uniform block contents for this projection.
    pub fn uniform(&self, resolution: Resolution) -> ProjectionUniform {
        let (pos, scale) = self.camera_params();
        ProjectionUniform {
            resolution: resolution.as_vec2().to_array(),
            camera_pos: pos.to_array(),
            camera_scale: scale,
            _pad: [0.0; 3],
        }
    }
}

/// Vertex stage output handed to the rasterizer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    pub clip: [f32; 4],
    pub color: ColorRgba,
    pub uv: Vec2,
}

/// Uniform block layout (32 bytes):
///
///  offset  0  resolution    [f32; 2]
///  offset  8  camera_pos    [f32; 2]
///  offset 16  camera_scale  f32
///  offset 20  _pad          [f32; 3]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ProjectionUniform {
    pub resolution: [f32; 2],
    pub camera_pos: [f32; 2],
    pub camera_scale: f32,
    pub _pad: [f32; 3],
}
