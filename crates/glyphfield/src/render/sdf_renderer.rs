use anyhow::{Context, Result};

use crate::projection::{Projection, ProjectionKind};
use crate::render::{RenderCtx, RenderTarget};
use crate::shaders::{self, FragmentKind};

use super::arena::{align_up, FrameArena};
use super::common::{linear_clamping_sampler, projection_ubo_min_binding_size, straight_alpha_blend};
use super::Vertex;

const MIN_VERTEX_SLOTS: u64 = 96;
const MIN_UNIFORM_SLOTS: u64 = 16;

// ── config ────────────────────────────────────────────────────────────────

/// Program selection and output state for an [`SdfRenderer`].
#[derive(Debug, Clone)]
pub struct ShadingConfig {
    /// Vertex entry point. Draws must pass a [`Projection`] of the same kind.
    pub projection: ProjectionKind,

    /// Fragment entry point.
    pub fragment: FragmentKind,

    /// Color target blending. `None` overwrites the target.
    pub blend: Option<wgpu::BlendState>,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Camera,
            fragment: FragmentKind::Sdf,
            blend: Some(straight_alpha_blend()),
        }
    }
}

impl ShadingConfig {
    pub fn new(projection: ProjectionKind, fragment: FragmentKind) -> Self {
        Self { projection, fragment, ..Self::default() }
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Draws host-built triangle lists with one shading program.
///
/// GPU objects are created lazily on first use. The pipeline is rebuilt when
/// the target format changes; bind group layouts live as long as the renderer
/// so a bound distance field survives a format change.
///
/// Several [`render`](Self::render) calls may be recorded before one submit.
/// Each draw appends its vertices and projection block to the frame's buffers
/// instead of overwriting the previous draw's data. Call
/// [`begin_frame`](Self::begin_frame) once per frame to reuse that space.
///
/// Bind groups:
/// - group 0: projection uniform, one dynamic-offset slot per draw (vertex)
/// - group 1: distance texture + sampler (fragment, `FragmentKind::Sdf` only)
pub struct SdfRenderer {
    config: ShadingConfig,

    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    // layouts
    projection_bgl: Option<wgpu::BindGroupLayout>,
    field_bgl: Option<wgpu::BindGroupLayout>,

    // bindings
    projection_ubo: Option<wgpu::Buffer>,
    projection_bind_group: Option<wgpu::BindGroup>,
    uniform_stride: u64,
    uniform_arena: FrameArena,
    sampler: Option<wgpu::Sampler>,
    field_bind_group: Option<wgpu::BindGroup>,

    // geometry
    vertex_vbo: Option<wgpu::Buffer>,
    vertex_arena: FrameArena,
}

impl SdfRenderer {
    pub fn new(config: ShadingConfig) -> Self {
        Self {
            config,
            pipeline_format: None,
            pipeline: None,
            projection_bgl: None,
            field_bgl: None,
            projection_ubo: None,
            projection_bind_group: None,
            uniform_stride: 0,
            uniform_arena: FrameArena::new(MIN_UNIFORM_SLOTS),
            sampler: None,
            field_bind_group: None,
            vertex_vbo: None,
            vertex_arena: FrameArena::new(MIN_VERTEX_SLOTS),
        }
    }

    /// Starts a new frame: later draws reuse buffer space from the start.
    ///
    /// Only call this once the previous frame's commands have been submitted.
    /// Without it the buffers keep growing.
    pub fn begin_frame(&mut self) {
        self.uniform_arena.reset();
        self.vertex_arena.reset();
    }

    pub fn config(&self) -> &ShadingConfig {
        &self.config
    }

    /// Binds the distance texture sampled by `fs_sdf`.
    ///
    /// The view must be a filterable single-channel 2D texture (`R8Unorm`).
    /// Call again whenever the host replaces the texture.
    pub fn set_field(&mut self, ctx: &RenderCtx<'_>, field: &wgpu::TextureView) {
        if !self.config.fragment.samples_field() {
            log::debug!("SdfRenderer: {:?} program ignores the distance field", self.config.fragment);
            return;
        }

        self.ensure_layouts(ctx);
        self.ensure_sampler(ctx);

        let Some(bgl)     = self.field_bgl.as_ref() else { return; };
        let Some(sampler) = self.sampler.as_ref()   else { return; };

        self.field_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glyphfield field bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(field),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    /// Draws `vertices` as a triangle list into `target`.
    ///
    /// Vertices and the projection block are appended after earlier draws of
    /// the current frame, so draws recorded before one submit do not clobber
    /// each other. Empty input is a no-op. Fails when the resolution would divide by
    /// zero, when `projection` does not match the configured program, or when
    /// an SDF program has no field bound.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        projection: &Projection,
        vertices: &[Vertex],
    ) -> Result<()> {
        if vertices.is_empty() {
            return Ok(());
        }

        anyhow::ensure!(
            ctx.resolution.is_valid(),
            "invalid resolution {}x{}",
            ctx.resolution.width,
            ctx.resolution.height
        );
        anyhow::ensure!(
            projection.kind() == self.config.projection,
            "{:?} projection passed to a {:?} program",
            projection.kind(),
            self.config.projection
        );

        // ── mutable operations before any immutable borrows ────────────────
        self.ensure_pipeline(ctx);
        self.ensure_layouts(ctx);
        let uniform_offset = self.reserve_uniform_slot(ctx);
        let vertex_offset = self.reserve_vertices(ctx, vertices.len() as u64);

        let ubo = self.projection_ubo.as_ref().context("projection uniform buffer missing")?;
        ctx.queue.write_buffer(
            ubo,
            uniform_offset,
            bytemuck::bytes_of(&projection.uniform(ctx.resolution)),
        );
        let dynamic_offset = wgpu::DynamicOffset::try_from(uniform_offset)
            .context("projection uniform offset exceeds u32")?;

        let vbo = self.vertex_vbo.as_ref().context("vertex buffer missing")?;
        ctx.queue.write_buffer(vbo, vertex_offset, bytemuck::cast_slice(vertices));

        // ── immutable borrows ──────────────────────────────────────────────
        let pipeline = self.pipeline.as_ref().context("pipeline missing")?;
        let projection_bg = self
            .projection_bind_group
            .as_ref()
            .context("projection bind group missing")?;
        let field_bg = if self.config.fragment.samples_field() {
            Some(
                self.field_bind_group
                    .as_ref()
                    .context("no distance field bound; call set_field first")?,
            )
        } else {
            None
        };

        let byte_range = vertex_offset..vertex_offset + std::mem::size_of_val(vertices) as u64;

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glyphfield pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, projection_bg, &[dynamic_offset]);
        if let Some(field_bg) = field_bg {
            rpass.set_bind_group(1, field_bg, &[]);
        }
        rpass.set_vertex_buffer(0, vbo.slice(byte_range));
        rpass.draw(0..vertices.len() as u32, 0..1);

        Ok(())
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.projection_bgl.is_some() && self.field_bgl.is_some() {
            return;
        }

        self.projection_bgl = Some(ctx.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("glyphfield projection bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: projection_ubo_min_binding_size(),
                    },
                    count: None,
                }],
            },
        ));

        self.field_bgl = Some(ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glyphfield field bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        }));

        // Bind groups made against older layouts are no longer valid.
        self.projection_bind_group = None;
        self.projection_ubo = None;
        self.uniform_arena.invalidate();
        self.field_bind_group = None;
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.target_format) && self.pipeline.is_some() {
            return;
        }

        self.ensure_layouts(ctx);
        let Some(projection_bgl) = self.projection_bgl.as_ref() else { return; };
        let Some(field_bgl)      = self.field_bgl.as_ref()      else { return; };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glyphfield shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::WGSL.into()),
        });

        let with_field = [projection_bgl, field_bgl];
        let bind_group_layouts: &[&wgpu::BindGroupLayout] = if self.config.fragment.samples_field() {
            &with_field
        } else {
            &with_field[..1]
        };

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glyphfield pipeline layout"),
            bind_group_layouts,
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glyphfield pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(self.config.projection.entry_point()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(self.config.fragment.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.target_format,
                    blend: self.config.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "SdfRenderer: built {} / {} pipeline for {:?}",
            self.config.projection.entry_point(),
            self.config.fragment.entry_point(),
            ctx.target_format
        );

        self.pipeline_format = Some(ctx.target_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(linear_clamping_sampler(ctx.device));
    }

    /// Reserves one projection block and returns its byte offset, growing the
    /// uniform buffer (and its bind group) when the frame outgrows it.
    fn reserve_uniform_slot(&mut self, ctx: &RenderCtx<'_>) -> u64 {
        if self.uniform_stride == 0 {
            let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
            self.uniform_stride = align_up(
                std::mem::size_of::<crate::projection::ProjectionUniform>() as u64,
                alignment,
            );
        }

        let slot = self.uniform_arena.reserve(1);
        if let Some(slots) = slot.grow_to {
            self.grow_projection_bindings(ctx, slots);
        }
        slot.offset * self.uniform_stride
    }

    fn grow_projection_bindings(&mut self, ctx: &RenderCtx<'_>, slots: u64) {
        let Some(bgl) = self.projection_bgl.as_ref() else { return; };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glyphfield projection ubo"),
            size: slots * self.uniform_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glyphfield projection bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: projection_ubo_min_binding_size(),
                }),
            }],
        });

        log::debug!("SdfRenderer: projection ubo grown to {slots} slots");

        self.projection_ubo = Some(ubo);
        self.projection_bind_group = Some(bind_group);
    }

    /// Reserves room for `count` vertices and returns the byte offset.
    fn reserve_vertices(&mut self, ctx: &RenderCtx<'_>, count: u64) -> u64 {
        let range = self.vertex_arena.reserve(count);
        if let Some(slots) = range.grow_to {
            self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("glyphfield vertex vbo"),
                size: slots * std::mem::size_of::<Vertex>() as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            log::debug!("SdfRenderer: vertex vbo grown to {slots} vertices");
        }
        range.offset * std::mem::size_of::<Vertex>() as u64
    }
}

impl Default for SdfRenderer {
    fn default() -> Self {
        Self::new(ShadingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_camera_sdf_with_straight_alpha() {
        let config = ShadingConfig::default();
        assert_eq!(config.projection, ProjectionKind::Camera);
        assert_eq!(config.fragment, FragmentKind::Sdf);
        assert_eq!(config.blend, Some(wgpu::BlendState::ALPHA_BLENDING));
    }

    #[test]
    fn new_config_keeps_default_blend() {
        let config = ShadingConfig::new(ProjectionKind::Plain, FragmentKind::Solid);
        assert_eq!(config.projection, ProjectionKind::Plain);
        assert_eq!(config.fragment, FragmentKind::Solid);
        assert!(config.blend.is_some());
    }

    #[test]
    fn renderer_starts_without_gpu_objects() {
        let renderer = SdfRenderer::default();
        assert!(renderer.pipeline.is_none());
        assert!(renderer.field_bind_group.is_none());
        assert_eq!(renderer.vertex_arena.capacity(), 0);
        assert_eq!(renderer.uniform_arena.capacity(), 0);
        assert_eq!(renderer.config().fragment, FragmentKind::Sdf);
    }

    // ── frame buffers ─────────────────────────────────────────────────────

    #[test]
    fn draws_in_one_frame_get_separate_ranges() {
        let mut renderer = SdfRenderer::default();
        let first = renderer.vertex_arena.reserve(6);
        let second = renderer.vertex_arena.reserve(6);
        assert_eq!(first.offset, 0);
        assert_eq!(second.offset, 6);

        let u0 = renderer.uniform_arena.reserve(1);
        let u1 = renderer.uniform_arena.reserve(1);
        assert_ne!(u0.offset, u1.offset);
    }

    #[test]
    fn begin_frame_rewinds_both_buffers() {
        let mut renderer = SdfRenderer::default();
        renderer.vertex_arena.reserve(6);
        renderer.vertex_arena.reserve(6);
        renderer.uniform_arena.reserve(1);
        renderer.uniform_arena.reserve(1);

        renderer.begin_frame();

        let vertices = renderer.vertex_arena.reserve(6);
        let uniform = renderer.uniform_arena.reserve(1);
        assert_eq!((vertices.offset, vertices.grow_to), (0, None));
        assert_eq!((uniform.offset, uniform.grow_to), (0, None));
        assert_eq!(renderer.vertex_arena.capacity(), MIN_VERTEX_SLOTS);
        assert_eq!(renderer.uniform_arena.capacity(), MIN_UNIFORM_SLOTS);
    }

    #[test]
    fn uniform_stride_honours_offset_alignment() {
        let block = std::mem::size_of::<crate::projection::ProjectionUniform>() as u64;
        let stride = align_up(block, wgpu::Limits::default().min_uniform_buffer_offset_alignment as u64);
        assert!(stride >= block);
        assert_eq!(stride % 256, 0);
    }
}
