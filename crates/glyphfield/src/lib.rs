//! glyphfield: 2D projection and distance-field glyph shading.
//!
//! The shading contract exists twice: as shader source in [`shaders`] (WGSL
//! for wgpu, generated GLSL for GL hosts) and as a CPU reference in
//! [`projection`], [`sdf`] and [`software`]. [`render`] binds the WGSL
//! programs on a host-owned wgpu device.

pub mod camera;
pub mod coords;
pub mod field;
pub mod logging;
pub mod projection;
pub mod render;
pub mod sdf;
pub mod shaders;
pub mod software;
