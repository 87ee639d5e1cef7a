//! GLSL 3.30 sources for GL hosts.
//!
//! One template per stage. The fragment variants a GL host may need differ
//! only in how the color output is declared, which [`OutputBinding`] selects.
//!
//! Attribute locations: 0 = position, 1 = color, 2 = uv.
//! Uniform names: `resolution`, `camera_pos`, `camera_scale`, `image`.

use crate::projection::ProjectionKind;
use crate::sdf::EDGE;

use super::FragmentKind;

/// Name of the distance texture uniform.
pub const IMAGE_UNIFORM: &str = "image";

/// How a fragment program declares its single color output.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum OutputBinding {
    /// Built-in `gl_FragColor` (compatibility profile).
    FragColor,
    /// `out vec4 color;`, bound by name with `glBindFragDataLocation`.
    Named,
    /// `layout(location = 0) out vec4 frag_color;`.
    #[default]
    Located,
}

impl OutputBinding {
    /// Identifier the program writes its color to.
    pub const fn output_name(self) -> &'static str {
        match self {
            OutputBinding::FragColor => "gl_FragColor",
            OutputBinding::Named => "color",
            OutputBinding::Located => "frag_color",
        }
    }

    const fn version(self) -> &'static str {
        match self {
            OutputBinding::FragColor => "#version 330 compatibility",
            OutputBinding::Named | OutputBinding::Located => "#version 330 core",
        }
    }

    const fn declaration(self) -> Option<&'static str> {
        match self {
            OutputBinding::FragColor => None,
            OutputBinding::Named => Some("out vec4 color;"),
            OutputBinding::Located => Some("layout(location = 0) out vec4 frag_color;"),
        }
    }
}

/// Vertex shader for the given projection.
pub fn vertex_source(kind: ProjectionKind) -> String {
    let (uniforms, xy) = match kind {
        ProjectionKind::Plain => ("uniform vec2 resolution;\n", "2.0 * position / resolution"),
        ProjectionKind::Camera => (
            "uniform vec2 resolution;\nuniform vec2 camera_pos;\nuniform float camera_scale;\n",
            "2.0 * (position - camera_pos) * camera_scale / resolution",
        ),
    };

    format!(
        "#version 330 core

layout(location = 0) in vec2 position;
layout(location = 1) in vec4 color;
layout(location = 2) in vec2 uv;

{uniforms}
out vec4 out_color;
out vec2 out_uv;

void main() {{
    gl_Position = vec4({xy}, 0.0, 1.0);
    out_color = color;
    out_uv = uv;
}}
"
    )
}

/// Fragment shader for the given stage and output convention.
pub fn fragment_source(kind: FragmentKind, binding: OutputBinding) -> String {
    let version = binding.version();
    let sampler = if kind.samples_field() {
        format!("uniform sampler2D {IMAGE_UNIFORM};\n\n")
    } else {
        String::new()
    };
    let output = binding.declaration().map(|d| format!("{d}\n")).unwrap_or_default();

    let target = binding.output_name();
    let body = match kind {
        FragmentKind::Sdf => format!(
            "    float d = texture({IMAGE_UNIFORM}, out_uv).r;
    float aaf = fwidth(d);
    float alpha = smoothstep({EDGE:?} - aaf, {EDGE:?} + aaf, d);
    {target} = vec4(out_color.rgb, alpha);
"
        ),
        FragmentKind::Solid => format!("    {target} = out_color;\n"),
    };

    format!(
        "{version}

{sampler}in vec4 out_color;
in vec2 out_uv;
{output}
void main() {{
{body}}}
"
    )
}

/// Uniforms a linked program must resolve, in lookup order.
pub fn program_uniforms(projection: ProjectionKind, fragment: FragmentKind) -> Vec<&'static str> {
    let mut names = projection.uniform_names().to_vec();
    if fragment.samples_field() {
        names.push(IMAGE_UNIFORM);
    }
    names
}
