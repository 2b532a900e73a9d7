//! Sprite pipeline construction and the shader entry-point contract.

use crate::device::{DeviceError, ShaderLinkError};

/// Built-in sprite shader.
pub const SPRITE_SHADER: &str = include_str!("shaders/sprite.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";
/// Fragment entry used instead of [`FRAGMENT_ENTRY`] when blending is off.
pub const CUTOUT_ENTRY: &str = "fs_cutout";

/// Entry points a sprite shader must declare.
pub fn required_entry_points(blending: bool) -> &'static [&'static str] {
    if blending {
        &[VERTEX_ENTRY, FRAGMENT_ENTRY]
    } else {
        &[VERTEX_ENTRY, FRAGMENT_ENTRY, CUTOUT_ENTRY]
    }
}

/// Checks that `source` declares every required entry point.
///
/// This is a textual check on `fn <name>(`; it does not parse WGSL.
pub fn validate_entry_points(source: &str, blending: bool) -> Result<(), DeviceError> {
    let missing: Vec<&'static str> = required_entry_points(blending)
        .iter()
        .copied()
        .filter(|name| !declares_function(source, name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ShaderLinkError::MissingEntryPoints(missing).into())
    }
}

/// Maps the error captured around pipeline construction to a link failure.
pub(crate) fn check_link(captured: Option<wgpu::Error>) -> Result<(), DeviceError> {
    match captured {
        None => Ok(()),
        Some(err) => {
            let message = match err {
                wgpu::Error::Validation { description, .. } => description,
                other => other.to_string(),
            };
            Err(ShaderLinkError::Validation(message).into())
        }
    }
}

fn declares_function(source: &str, name: &str) -> bool {
    source.match_indices("fn").any(|(at, _)| {
        let starts_word = source[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !is_ident(c));

        let rest = &source[at + 2..];
        let after_space = rest.trim_start();
        if !starts_word || after_space.len() == rest.len() {
            return false;
        }

        after_space
            .strip_prefix(name)
            .is_some_and(|tail| tail.trim_start().starts_with('('))
    })
}

#[inline]
fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// ── vertex layouts ────────────────────────────────────────────────────────

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const TEX_COORD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];

/// One buffer per stream, matching `BufferStream` slots 0..=2.
pub(crate) fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    let f32_size = std::mem::size_of::<f32>() as u64;
    [
        wgpu::VertexBufferLayout {
            array_stride: 2 * f32_size,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: 2 * f32_size,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &TEX_COORD_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: 4 * f32_size,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRS,
        },
    ]
}

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) alpha blending.
pub(crate) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── construction ──────────────────────────────────────────────────────────

/// Pipeline knobs derived from the canvas configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct PipelineOptions {
    pub format: wgpu::TextureFormat,
    pub blending: bool,
    pub sample_count: u32,
}

pub(crate) fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("tessera sprite bgl"),
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
    })
}

/// Nearest filtering unless `smoothing` is set.
pub(crate) fn create_sampler(device: &wgpu::Device, smoothing: bool) -> wgpu::Sampler {
    let filter = if smoothing {
        wgpu::FilterMode::Linear
    } else {
        wgpu::FilterMode::Nearest
    };

    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("tessera sprite sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

/// Builds the sprite pipeline from WGSL that already passed
/// [`validate_entry_points`].
pub(crate) fn create_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    source: &str,
    options: PipelineOptions,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("tessera sprite shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("tessera sprite pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    let (fragment_entry, blend) = if options.blending {
        (FRAGMENT_ENTRY, Some(straight_alpha_blend()))
    } else {
        (CUTOUT_ENTRY, None)
    };

    let buffers = vertex_layouts();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tessera sprite pipeline"),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: options.format,
                blend,
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
        multisample: wgpu::MultisampleState {
            count: options.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },

        multiview_mask: None,
        cache: None,
    })
}
