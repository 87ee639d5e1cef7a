//! Shader sources.
//!
//! The wgpu pipeline consumes [`WGSL`]; GL hosts generate GLSL 3.30 text from
//! [`glsl`]. Both encode the same contract as [`crate::projection`] and
//! [`crate::sdf`].

pub mod glsl;

/// Single WGSL module holding every vertex and fragment entry point.
pub const WGSL: &str = include_str!("sdf.wgsl");

/// Which fragment entry point a program uses.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FragmentKind {
    /// Distance-field glyph coverage.
    #[default]
    Sdf,
    /// Interpolated vertex color; no texture is bound.
    Solid,
}

impl FragmentKind {
    /// WGSL fragment entry point.
    pub const fn entry_point(self) -> &'static str {
        match self {
            FragmentKind::Sdf => "fs_sdf",
            FragmentKind::Solid => "fs_solid",
        }
    }

    #[inline]
    pub const fn samples_field(self) -> bool {
        matches!(self, FragmentKind::Sdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionKind;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(WGSL).unwrap_or_else(|e| panic!("{}", e.emit_to_string(WGSL)))
    }

    #[test]
    fn wgsl_validates() {
        let module = parse();
        let info = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module);
        if let Err(e) = info {
            panic!("sdf.wgsl validation failed: {:?}", e);
        }
    }

    #[test]
    fn wgsl_exposes_every_entry_point() {
        let module = parse();
        let names: Vec<&str> = module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        for kind in [ProjectionKind::Plain, ProjectionKind::Camera] {
            assert!(names.contains(&kind.entry_point()), "missing {}", kind.entry_point());
        }
        for kind in [FragmentKind::Sdf, FragmentKind::Solid] {
            assert!(names.contains(&kind.entry_point()), "missing {}", kind.entry_point());
        }
    }

    #[test]
    fn wgsl_uniform_block_is_32_bytes() {
        let module = parse();
        let (_, global) = module
            .global_variables
            .iter()
            .find(|(_, g)| g.name.as_deref() == Some("projection"))
            .expect("projection uniform");
        let size = module.types[global.ty].inner.size(module.to_ctx());
        assert_eq!(size as usize, std::mem::size_of::<crate::projection::ProjectionUniform>());
    }

    /// Source text of the WGSL function `name`, from signature to closing brace.
    fn wgsl_fn(name: &str) -> &'static str {
        let start = WGSL.find(&format!("fn {name}(")).unwrap_or_else(|| panic!("no fn {name}"));
        let len = WGSL[start..].find("\n}").expect("closing brace");
        &WGSL[start..start + len]
    }

    fn entry_point<'m>(module: &'m naga::Module, name: &str) -> &'m naga::Function {
        &module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .unwrap_or_else(|| panic!("no entry point {name}"))
            .function
    }

    // ── formulas ──────────────────────────────────────────────────────────

    #[test]
    fn wgsl_edge_matches_cpu_constant() {
        assert!(WGSL.contains(&format!("const EDGE: f32 = {:?};", crate::sdf::EDGE)));
    }

    #[test]
    fn vs_plain_is_two_p_over_r() {
        assert!(wgsl_fn("vs_plain").contains("emit(2.0 * input.position / projection.resolution, input)"));
    }

    #[test]
    fn vs_camera_offsets_then_scales() {
        let body = wgsl_fn("vs_camera");
        assert!(body.contains("let offset = input.position - projection.camera_pos;"));
        assert!(body.contains(
            "emit(2.0 * offset * projection.camera_scale / projection.resolution, input)"
        ));
    }

    #[test]
    fn emit_fixes_depth_and_passes_attributes_through() {
        let body = wgsl_fn("emit");
        assert!(body.contains("vec4<f32>(xy, 0.0, 1.0)"));
        assert!(body.contains("out.color = input.color;"));
        assert!(body.contains("out.uv = input.uv;"));
    }

    #[test]
    fn fs_sdf_text_keeps_rgb_and_centers_band() {
        let body = wgsl_fn("fs_sdf");
        assert!(body.contains("textureSample(field_texture, field_sampler, in.uv).r"));
        assert!(body.contains("let aaf = fwidth(d);"));
        assert!(body.contains("smoothstep(EDGE - aaf, EDGE + aaf, d)"));
        assert!(body.contains("return vec4<f32>(in.color.rgb, alpha);"));
        assert!(!body.contains("in.color.a"));
    }

    #[test]
    fn fs_sdf_ir_uses_fwidth_and_ordered_smoothstep() {
        use naga::{BinaryOperator, DerivativeAxis, Expression, MathFunction};

        let module = parse();
        let func = entry_point(&module, "fs_sdf");
        let exprs = &func.expressions;

        assert!(
            exprs.iter().any(|(_, e)| matches!(e, Expression::Derivative { axis: DerivativeAxis::Width, .. })),
            "fs_sdf has no fwidth"
        );

        let (arg, arg1) = exprs
            .iter()
            .find_map(|(_, e)| match e {
                Expression::Math { fun: MathFunction::SmoothStep, arg, arg1: Some(arg1), .. } => {
                    Some((*arg, *arg1))
                }
                _ => None,
            })
            .expect("fs_sdf has no smoothstep");
        assert!(matches!(exprs[arg], Expression::Binary { op: BinaryOperator::Subtract, .. }));
        assert!(matches!(exprs[arg1], Expression::Binary { op: BinaryOperator::Add, .. }));
    }

    #[test]
    fn fs_solid_returns_vertex_color() {
        assert!(wgsl_fn("fs_solid").contains("return in.color;"));
    }

    #[test]
    fn only_sdf_samples_the_field() {
        assert!(FragmentKind::Sdf.samples_field());
        assert!(!FragmentKind::Solid.samples_field());
    }
}
