use std::path::Path;
use std::time::Duration;

use image::RgbaImage;

use crate::batch::{BatchError, BatchStats, SceneBatch};
use crate::coords::{Rect, Viewport};
use crate::device::{DeviceError, GraphicsDevice, TextureUpload};
use crate::paint::Rgba;
use crate::render::{FrameSubmitter, RenderCtx, RenderTarget, SpriteDevice};
use crate::texture::{
    expand_to_rgba, pad_to_power_of_two, FileLoader, LoadOutcome, PaddedImage, Texture,
    TextureError, TextureId, TextureInfo, TextureRef, TextureStore,
};
use crate::transform::{AffineTransform, Transform};

use super::{CanvasConfig, DrawError};

/// Immediate-mode 2D sprite canvas.
///
/// Per frame: [`begin_frame`](Self::begin_frame), any number of `draw_*`
/// calls, [`end_frame`](Self::end_frame), [`render_frame`](Self::render_frame).
/// Draws are batched into texture runs in submission order, so grouping draws
/// by texture keeps the draw-call count low.
///
/// Textures that are still loading (or failed to load) draw with a 1×1 white
/// placeholder.
pub struct Canvas2d<D: GraphicsDevice = SpriteDevice> {
    device: D,
    config: CanvasConfig,
    batch: SceneBatch,
    submitter: FrameSubmitter,
    textures: TextureStore,
    loader: FileLoader,
    placeholder: TextureId,
    rejected_this_frame: usize,
}

impl<D: GraphicsDevice> Canvas2d<D> {
    /// Wraps `device` and creates the placeholder texture on it.
    pub fn new(mut device: D, config: CanvasConfig) -> Result<Self, TextureError> {
        let mut textures = TextureStore::new();

        let placeholder = textures.allocate_id();
        device.create_texture(
            placeholder,
            TextureUpload {
                width: 1,
                height: 1,
                rgba: &[255, 255, 255, 255],
            },
        )?;
        textures.mark_ready(placeholder, 1, 1, 1, 1);
        textures.set_placeholder(placeholder)?;

        let batch = SceneBatch::new(config.triangle_budget);
        log::debug!(
            "canvas: {} vertices / {} indices per frame",
            batch.vertex_capacity(),
            batch.index_capacity()
        );

        Ok(Self {
            device,
            config,
            batch,
            submitter: FrameSubmitter::new(),
            textures,
            loader: FileLoader::new(),
            placeholder,
            rejected_this_frame: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    #[inline]
    pub fn batch(&self) -> &SceneBatch {
        &self.batch
    }

    #[inline]
    pub fn stats(&self) -> BatchStats {
        self.batch.stats()
    }

    #[inline]
    pub fn placeholder(&self) -> TextureId {
        self.placeholder
    }

    // ── frame lifecycle ───────────────────────────────────────────────────

    /// Promotes finished texture loads, clears the target and resets the batch.
    pub fn begin_frame(&mut self) -> Viewport {
        self.poll_textures();
        self.rejected_this_frame = 0;
        self.submitter.begin_frame(&mut self.device, &mut self.batch)
    }

    /// Uploads this frame's geometry to the device.
    pub fn end_frame(&mut self) {
        if self.rejected_this_frame > 0 {
            log::debug!("{} draw(s) rejected this frame", self.rejected_this_frame);
        }
        self.submitter.end_frame(&mut self.device, &self.batch);
    }

    /// Issues one draw per texture run. Call after [`end_frame`](Self::end_frame).
    pub fn render_frame(&mut self) {
        self.submitter.render_frame(&mut self.device, &self.batch);
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[inline]
    pub fn transform(&self) -> &Transform {
        self.batch.transform()
    }

    #[inline]
    pub fn transform_mut(&mut self) -> &mut Transform {
        self.batch.transform_mut()
    }

    /// Switches strategy or restores a saved transform.
    pub fn set_transform(&mut self, transform: impl Into<Transform>) {
        self.batch.set_transform(transform);
    }

    /// Replaces the active transform with six affine scalars.
    pub fn set_transform_values(
        &mut self,
        x_scale: f32,
        x_shear: f32,
        y_shear: f32,
        y_scale: f32,
        x_offset: f32,
        y_offset: f32,
    ) {
        let mut m = AffineTransform::identity();
        m.set_transform(x_scale, x_shear, y_shear, y_scale, x_offset, y_offset);
        self.batch.set_transform(m);
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.batch.transform_mut().translate(x, y);
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.batch.transform_mut().scale(x, y);
    }

    pub fn rotate(&mut self, angle_degrees: f32) {
        self.batch.transform_mut().rotate(angle_degrees);
    }

    /// Affine only; the command-list strategy has no shear operation.
    pub fn shear(&mut self, x: f32, y: f32) {
        match self.batch.transform_mut().as_affine_mut() {
            Some(m) => m.shear(x, y),
            None => log::warn!("shear ignored: active transform is a command list"),
        }
    }

    pub fn reset_transform(&mut self) {
        self.batch.transform_mut().reset();
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Draws the `src` texel rect of `texture` into `dst`, untinted.
    pub fn draw_image(&mut self, texture: TextureId, src: Rect, dst: Rect) -> Result<(), DrawError> {
        self.draw_image_tinted(texture, src, dst, Rgba::WHITE)
    }

    pub fn draw_image_tinted(
        &mut self,
        texture: TextureId,
        src: Rect,
        dst: Rect,
        color: Rgba,
    ) -> Result<(), DrawError> {
        let tex = self.textures.resolve(texture)?;
        let result = self.batch.submit_image(tex, src, dst, color);
        self.note(result)
    }

    pub fn draw_triangle(
        &mut self,
        texture: TextureId,
        src: &[f32; 6],
        dst: &[f32; 6],
        colors: &[f32; 12],
    ) -> Result<(), DrawError> {
        let tex = self.textures.resolve(texture)?;
        let result = self.batch.submit_triangle(tex, src, dst, colors);
        self.note(result)
    }

    pub fn draw_triangle_fan(
        &mut self,
        texture: TextureId,
        src: &[f32],
        dst: &[f32],
        colors: &[f32],
    ) -> Result<(), DrawError> {
        let tex = self.textures.resolve(texture)?;
        let result = self.batch.submit_triangle_fan(tex, src, dst, colors);
        self.note(result)
    }

    pub fn draw_quad_centered(
        &mut self,
        texture: TextureId,
        src: &[f32; 8],
        dst: &[f32; 8],
        colors: &[f32; 16],
    ) -> Result<(), DrawError> {
        let tex = self.textures.resolve(texture)?;
        let result = self.batch.submit_quad_centered(tex, src, dst, colors);
        self.note(result)
    }

    fn note(&mut self, result: Result<(), BatchError>) -> Result<(), DrawError> {
        if let Err(e) = &result {
            if matches!(e, BatchError::CapacityExceeded { .. }) {
                if self.rejected_this_frame == 0 {
                    log::warn!("draw rejected: {e}");
                }
                self.rejected_this_frame += 1;
            }
        }
        result.map_err(DrawError::from)
    }

    // ── textures ──────────────────────────────────────────────────────────

    #[inline]
    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id)
    }

    /// Handle that draws would use for `id` right now.
    pub fn resolve_texture(&self, id: TextureId) -> Result<TextureRef, TextureError> {
        self.textures.resolve(id)
    }

    /// Creates a texture from raw pixels, unpadded.
    ///
    /// `data` holding fewer than `width * height` RGBA pixels is read as packed
    /// RGB and given opaque alpha.
    pub fn create_texture_from_pixels(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<TextureId, TextureError> {
        let rgba = expand_to_rgba(data, width, height)?;

        let id = self.textures.allocate_id();
        self.device.create_texture(
            id,
            TextureUpload {
                width,
                height,
                rgba: &rgba,
            },
        )?;
        let info = self.textures.mark_ready(id, width, height, width, height);
        log_created(id, &info);
        Ok(id)
    }

    /// Creates a texture from a decoded image, padded to power-of-two sides.
    pub fn create_texture_from_image(&mut self, image: &RgbaImage) -> Result<TextureId, TextureError> {
        let padded = pad_to_power_of_two(image)?;
        let id = self.textures.allocate_id();
        self.upload_padded(id, &padded)?;
        Ok(id)
    }

    /// Starts loading an image file. The handle draws as the placeholder until
    /// the decode finishes and a later [`begin_frame`](Self::begin_frame) picks
    /// it up.
    pub fn load_texture_file(&mut self, path: impl AsRef<Path>) -> TextureId {
        let path = path.as_ref().to_path_buf();
        let id = self.textures.insert_pending(path.clone());
        log::debug!("loading {id} from {}", path.display());
        self.loader.request(id, path);
        id
    }

    /// Applies finished file loads. Returns how many completed.
    pub fn poll_textures(&mut self) -> usize {
        let done = self.loader.poll();
        let count = done.len();
        for outcome in done {
            self.finish_load(outcome);
        }
        count
    }

    /// Blocks until pending loads finish or `timeout` passes.
    pub fn wait_for_textures(&mut self, timeout: Duration) -> usize {
        let done = self.loader.wait(timeout);
        let count = done.len();
        for outcome in done {
            self.finish_load(outcome);
        }
        count
    }

    /// Releases `id` from the registry and the device.
    ///
    /// Returns `false` for unknown handles and for the placeholder, which lives
    /// as long as the canvas.
    pub fn delete_texture(&mut self, id: TextureId) -> bool {
        if id == self.placeholder {
            log::warn!("refusing to delete the placeholder texture");
            return false;
        }

        match self.textures.remove(id) {
            Some(texture) => {
                if texture.is_ready() {
                    self.device.delete_texture(id);
                }
                log::debug!("deleted {id}");
                true
            }
            None => false,
        }
    }

    fn finish_load(&mut self, outcome: LoadOutcome) {
        let LoadOutcome { id, path, result } = outcome;

        if !self.textures.is_pending(id) {
            log::debug!("discarding load of {} for released {id}", path.display());
            return;
        }

        let uploaded = result
            .and_then(|image| pad_to_power_of_two(&image))
            .and_then(|padded| self.upload_padded(id, &padded));

        if let Err(e) = uploaded {
            log::warn!("texture {} failed to load ({e}); drawing placeholder", path.display());
            self.textures.mark_failed(id, e.to_string());
        }
    }

    fn upload_padded(&mut self, id: TextureId, padded: &PaddedImage) -> Result<TextureInfo, TextureError> {
        self.device.create_texture(
            id,
            TextureUpload {
                width: padded.pow_width,
                height: padded.pow_height,
                rgba: &padded.rgba,
            },
        )?;

        let info = self.textures.mark_ready(
            id,
            padded.width,
            padded.height,
            padded.pow_width,
            padded.pow_height,
        );
        log_created(id, &info);
        Ok(info)
    }
}

impl Canvas2d<SpriteDevice> {
    /// Canvas on the wgpu sprite device for the given render context.
    pub fn from_render_ctx(ctx: &RenderCtx<'_>, config: CanvasConfig) -> Result<Self, TextureError> {
        let device = SpriteDevice::new(
            ctx.device,
            ctx.queue,
            ctx.surface_format,
            ctx.surface_size,
            &config,
        );
        Self::new(device, config)
    }

    /// Picks up the current drawable size.
    pub fn sync_surface(&mut self, ctx: &RenderCtx<'_>) {
        let (w, h) = ctx.surface_size;
        self.device.set_surface_size(w, h);
    }

    /// Replaces the sprite shader; see [`SpriteDevice::use_shader`].
    pub fn use_shader(&mut self, wgsl: &str) -> Result<(), DeviceError> {
        self.device.use_shader(wgsl)
    }

    /// Encodes the rendered frame into `target`.
    pub fn encode(&mut self, target: &mut RenderTarget<'_>) {
        self.device.encode(target.encoder, target.color_view);
    }
}

fn log_created(id: TextureId, info: &TextureInfo) {
    log::debug!(
        "created {id} (#{}): {}x{} padded to {}x{}",
        info.index,
        info.width,
        info.height,
        info.pow_width,
        info.pow_height
    );
}
