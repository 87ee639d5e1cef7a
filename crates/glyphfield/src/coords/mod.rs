//! Coordinate and color types shared by the CPU reference and the GPU glue.
//!
//! Canonical CPU space:
//! - World/pixel units, origin at the viewport center
//! - +X right, +Y up
//!
//! The vertex stage maps this space to NDC using the resolution uniform.

mod color;
mod resolution;
mod vec2;

pub use color::ColorRgba;
pub use resolution::Resolution;
pub use vec2::Vec2;
