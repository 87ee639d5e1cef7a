//! wgpu glue for the shading programs.
//!
//! The host owns the device, the distance texture and the frame. This module
//! only builds the pipeline for a [`ShadingConfig`], writes the projection
//! uniform and records the draw.

mod arena;
mod common;
mod ctx;
mod sdf_renderer;
mod vertex;

pub use common::{linear_clamping_sampler, straight_alpha_blend};
pub use ctx::{RenderCtx, RenderTarget};
pub use sdf_renderer::{SdfRenderer, ShadingConfig};
pub use vertex::Vertex;
