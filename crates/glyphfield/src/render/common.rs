//! Shared GPU state descriptors.

use crate::projection::ProjectionUniform;

// ── blend ─────────────────────────────────────────────────────────────────

/// `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`: shader output is straight alpha.
pub fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}

// ── sampler ───────────────────────────────────────────────────────────────

/// Linear filtering, clamped to edge: the sampling policy the distance
/// threshold assumes. Atlases should leave padding between glyphs.
pub fn linear_clamping_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("glyphfield field sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

// ── projection UBO binding size ───────────────────────────────────────────

pub(super) fn projection_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<ProjectionUniform>() as u64)
}
