use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::canvas::CanvasConfig;
use crate::coords::Viewport;
use crate::device::{BufferStream, DeviceError, GraphicsDevice, IndexRange, TextureUpload, UploadMode};
use crate::texture::{TextureError, TextureId};

use super::pipeline::{self, PipelineOptions, SPRITE_SHADER};

struct StreamBuffer {
    buffer: wgpu::Buffer,
    size: u64,
}

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct MsaaTarget {
    view: wgpu::TextureView,
    size: (u32, u32),
}

#[derive(Debug, Copy, Clone)]
struct RecordedDraw {
    texture: TextureId,
    range: IndexRange,
}

/// wgpu implementation of [`GraphicsDevice`].
///
/// Buffer and texture calls go to the queue immediately. The pass itself
/// (clear plus one draw per run) is recorded and replayed by
/// [`encode`](Self::encode) once the frame's color target is available.
///
/// Dropping the device destroys every buffer and texture it created.
pub struct SpriteDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_size: (u32, u32),
    options: PipelineOptions,
    clear_color: wgpu::Color,

    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    pipeline: wgpu::RenderPipeline,

    buffers: HashMap<BufferStream, StreamBuffer>,
    textures: HashMap<TextureId, GpuTexture>,
    msaa: Option<MsaaTarget>,

    /// Viewport of the pass opened by `begin_pass`, until encoded.
    pass: Option<Viewport>,
    bound: Option<TextureId>,
    draws: Vec<RecordedDraw>,
    warned_unknown: HashSet<TextureId>,
}

impl SpriteDevice {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        surface_size: (u32, u32),
        config: &CanvasConfig,
    ) -> Self {
        let options = PipelineOptions {
            format: surface_format,
            blending: config.blending,
            sample_count: config.sample_count(),
        };

        let bind_group_layout = pipeline::create_bind_group_layout(device);
        let sampler = pipeline::create_sampler(device, config.smoothing);
        let render_pipeline =
            pipeline::create_pipeline(device, &bind_group_layout, SPRITE_SHADER, options);

        let [r, g, b, a] = config.clear_color.to_unit();

        log::debug!(
            "sprite device: {:?}, blending={}, samples={}, smoothing={}",
            surface_format,
            options.blending,
            options.sample_count,
            config.smoothing
        );

        Self {
            device: device.clone(),
            queue: queue.clone(),
            surface_size,
            options,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
            bind_group_layout,
            sampler,
            pipeline: render_pipeline,
            buffers: HashMap::new(),
            textures: HashMap::new(),
            msaa: None,
            pass: None,
            bound: None,
            draws: Vec::new(),
            warned_unknown: HashSet::new(),
        }
    }

    /// Replaces the sprite shader.
    ///
    /// The source must declare `vs_main` and `fs_main`, plus `fs_cutout` when
    /// blending is off, with the built-in shader's vertex inputs and bindings.
    /// On error the previous pipeline stays active.
    pub fn use_shader(&mut self, source: &str) -> Result<(), DeviceError> {
        pipeline::validate_entry_points(source, self.options.blending)?;

        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let candidate =
            pipeline::create_pipeline(&self.device, &self.bind_group_layout, source, self.options);
        if let Err(e) = pipeline::check_link(pollster::block_on(scope.pop())) {
            log::warn!("sprite shader rejected: {e}");
            return Err(e);
        }

        self.pipeline = candidate;
        log::info!("sprite shader replaced");
        Ok(())
    }

    /// Tracks the drawable size; call when the surface is resized.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
    }

    /// Replays the recorded pass into `encoder`, targeting `target`.
    ///
    /// Does nothing if no pass was begun since the last call.
    pub fn encode(&mut self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let Some(viewport) = self.pass.take() else { return };

        let (view, resolve_target, store) = match self.msaa.as_ref() {
            Some(msaa) => (&msaa.view, Some(target), wgpu::StoreOp::Discard),
            None => (target, None, wgpu::StoreOp::Store),
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        // A minimized window still gets its clear, but nothing is drawable.
        if self.draws.is_empty() || !viewport.is_valid() {
            return;
        }

        let (Some(positions), Some(tex_coords), Some(colors), Some(indices)) = (
            self.buffers.get(&BufferStream::Positions),
            self.buffers.get(&BufferStream::TexCoords),
            self.buffers.get(&BufferStream::Colors),
            self.buffers.get(&BufferStream::Indices),
        ) else {
            log::warn!("draws recorded before stream buffers were uploaded; skipped");
            return;
        };

        let (w, h) = self.surface_size;
        rpass.set_viewport(
            0.0,
            0.0,
            viewport.width.min(w as f32),
            viewport.height.min(h as f32),
            0.0,
            1.0,
        );
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, positions.buffer.slice(..));
        rpass.set_vertex_buffer(1, tex_coords.buffer.slice(..));
        rpass.set_vertex_buffer(2, colors.buffer.slice(..));
        rpass.set_index_buffer(indices.buffer.slice(..), wgpu::IndexFormat::Uint16);

        for draw in &self.draws {
            // Deleted between bind and encode.
            let Some(texture) = self.textures.get(&draw.texture) else { continue };
            rpass.set_bind_group(0, &texture.bind_group, &[]);
            rpass.draw_indexed(draw.range.first_index..draw.range.end(), 0, 0..1);
        }
    }

    fn ensure_msaa_target(&mut self) {
        if self.options.sample_count <= 1 {
            self.msaa = None;
            return;
        }

        let (w, h) = self.surface_size;
        if w == 0 || h == 0 || self.msaa.as_ref().is_some_and(|m| m.size == (w, h)) {
            return;
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessera msaa target"),
            size: wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.options.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.options.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.msaa = Some(MsaaTarget {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            size: (w, h),
        });
    }
}

impl GraphicsDevice for SpriteDevice {
    fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    fn begin_pass(&mut self, viewport: Viewport) {
        self.ensure_msaa_target();
        self.pass = Some(viewport);
        self.bound = None;
        self.draws.clear();
    }

    fn upload(&mut self, stream: BufferStream, bytes: &[u8], mode: UploadMode) {
        let bytes = pad_to_copy_alignment(bytes);
        let len = bytes.len() as u64;

        let reallocate = match (mode, self.buffers.get(&stream)) {
            (UploadMode::Full, Some(existing)) => existing.size != len,
            (UploadMode::Partial, Some(existing)) => existing.size < len,
            (_, None) => true,
        };

        if reallocate {
            if mode == UploadMode::Partial {
                log::debug!("{stream:?}: partial upload without a large enough buffer; reallocating");
            }

            let usage = match stream {
                BufferStream::Indices => wgpu::BufferUsages::INDEX,
                _ => wgpu::BufferUsages::VERTEX,
            };
            let size = len.max(wgpu::COPY_BUFFER_ALIGNMENT);
            let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(stream_label(stream)),
                size,
                usage: usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            if let Some(old) = self.buffers.insert(stream, StreamBuffer { buffer, size }) {
                old.buffer.destroy();
            }
        }

        if bytes.is_empty() {
            return;
        }
        if let Some(target) = self.buffers.get(&stream) {
            self.queue.write_buffer(&target.buffer, 0, &bytes);
        }
    }

    fn create_texture(&mut self, id: TextureId, upload: TextureUpload<'_>) -> Result<(), TextureError> {
        let TextureUpload { width, height, rgba } = upload;
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyDimensions { width, height });
        }

        let max = self.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(TextureError::TooLarge { width, height, max });
        }

        let expected = width as usize * height as usize * 4;
        if rgba.len() < expected {
            return Err(TextureError::DataTooShort {
                expected,
                actual: rgba.len(),
            });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessera sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba[..expected],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera sprite bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        if let Some(old) = self.textures.insert(id, GpuTexture { texture, bind_group }) {
            old.texture.destroy();
        }
        self.warned_unknown.remove(&id);
        Ok(())
    }

    fn delete_texture(&mut self, id: TextureId) {
        if let Some(gpu) = self.textures.remove(&id) {
            gpu.texture.destroy();
        }
        if self.bound == Some(id) {
            self.bound = None;
        }
    }

    fn bind_texture(&mut self, id: TextureId) {
        if self.textures.contains_key(&id) {
            self.bound = Some(id);
            return;
        }

        self.bound = None;
        if self.warned_unknown.insert(id) {
            log::warn!("draw references {id}, which the device does not hold; skipping its runs");
        }
    }

    fn draw_indexed(&mut self, range: IndexRange) {
        if let Some(texture) = self.bound {
            self.draws.push(RecordedDraw { texture, range });
        }
    }
}

impl Drop for SpriteDevice {
    fn drop(&mut self) {
        log::debug!(
            "releasing sprite device: {} textures, {} buffers",
            self.textures.len(),
            self.buffers.len()
        );
        for (_, gpu) in self.textures.drain() {
            gpu.texture.destroy();
        }
        for (_, stream) in self.buffers.drain() {
            stream.buffer.destroy();
        }
    }
}

fn stream_label(stream: BufferStream) -> &'static str {
    match stream {
        BufferStream::Positions => "tessera position buffer",
        BufferStream::TexCoords => "tessera texcoord buffer",
        BufferStream::Colors => "tessera color buffer",
        BufferStream::Indices => "tessera index buffer",
    }
}

/// Zero-pads to the queue's copy alignment.
fn pad_to_copy_alignment(bytes: &[u8]) -> Cow<'_, [u8]> {
    let align = wgpu::COPY_BUFFER_ALIGNMENT as usize;
    let rem = bytes.len() % align;
    if rem == 0 {
        return Cow::Borrowed(bytes);
    }

    let mut padded = Vec::with_capacity(bytes.len() + align - rem);
    padded.extend_from_slice(bytes);
    padded.resize(bytes.len() + align - rem, 0);
    Cow::Owned(padded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_bytes_are_borrowed() {
        assert!(matches!(pad_to_copy_alignment(&[1, 2, 3, 4]), Cow::Borrowed(_)));
    }

    #[test]
    fn unaligned_bytes_are_zero_padded() {
        assert_eq!(&*pad_to_copy_alignment(&[1, 2, 3, 4, 5, 6]), &[1, 2, 3, 4, 5, 6, 0, 0]);
    }
}
