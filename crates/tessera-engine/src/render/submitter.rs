use crate::batch::SceneBatch;
use crate::coords::Viewport;
use crate::device::{BufferStream, GraphicsDevice, IndexRange, UploadMode};

/// Drives one batch through the frame lifecycle on a device.
///
/// The first [`end_frame`](Self::end_frame) uploads every stream at full
/// capacity. Later frames upload only the written prefix; the stale tail is
/// never indexed because draws are bounded by the run counts.
#[derive(Debug, Default)]
pub struct FrameSubmitter {
    buffers_allocated: bool,
    frames: u64,
}

impl FrameSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the viewport to the surface, opens the cleared pass, and resets
    /// the batch.
    pub fn begin_frame<D>(&mut self, device: &mut D, batch: &mut SceneBatch) -> Viewport
    where
        D: GraphicsDevice + ?Sized,
    {
        let (width, height) = device.surface_size();
        let viewport = Viewport::from_physical(width, height);

        device.begin_pass(viewport);
        batch.reset(viewport);
        viewport
    }

    /// Uploads the packed streams.
    pub fn end_frame<D>(&mut self, device: &mut D, batch: &SceneBatch)
    where
        D: GraphicsDevice + ?Sized,
    {
        if self.buffers_allocated {
            self.upload_written(device, batch);
        } else {
            self.upload_full(device, batch);
            self.buffers_allocated = true;
        }

        let stats = batch.stats();
        log::debug!(
            "frame {}: {} triangles, {} vertices, {} draw calls",
            self.frames,
            stats.triangles,
            stats.vertices,
            stats.runs
        );
        self.frames += 1;
    }

    /// One bind + indexed draw per texture run, in run order.
    pub fn render_frame<D>(&self, device: &mut D, batch: &SceneBatch)
    where
        D: GraphicsDevice + ?Sized,
    {
        let mut first_index = 0u32;
        for run in batch.runs() {
            let index_count = run.index_count();
            device.bind_texture(run.texture);
            device.draw_indexed(IndexRange {
                first_index,
                index_count,
            });
            first_index += index_count;
        }
    }

    /// Forces the next `end_frame` to do a full upload (e.g. after the device
    /// buffers were recreated).
    pub fn invalidate(&mut self) {
        self.buffers_allocated = false;
    }

    #[inline]
    pub fn frames_submitted(&self) -> u64 {
        self.frames
    }

    fn upload_full<D>(&self, device: &mut D, batch: &SceneBatch)
    where
        D: GraphicsDevice + ?Sized,
    {
        let storage = batch.storage();
        device.upload(BufferStream::Positions, bytemuck::cast_slice(storage.positions), UploadMode::Full);
        device.upload(BufferStream::TexCoords, bytemuck::cast_slice(storage.tex_coords), UploadMode::Full);
        device.upload(BufferStream::Colors, bytemuck::cast_slice(storage.colors), UploadMode::Full);
        device.upload(BufferStream::Indices, bytemuck::cast_slice(storage.indices), UploadMode::Full);
    }

    fn upload_written<D>(&self, device: &mut D, batch: &SceneBatch)
    where
        D: GraphicsDevice + ?Sized,
    {
        let partial = |device: &mut D, stream, bytes: &[u8]| {
            if !bytes.is_empty() {
                device.upload(stream, bytes, UploadMode::Partial);
            }
        };

        partial(device, BufferStream::Positions, bytemuck::cast_slice(batch.positions()));
        partial(device, BufferStream::TexCoords, bytemuck::cast_slice(batch.tex_coords()));
        partial(device, BufferStream::Colors, bytemuck::cast_slice(batch.colors()));

        // u16 indices: round to an even count so the byte range stays 4-aligned.
        // Index capacity is even, so the rounded prefix is always in bounds.
        let storage = batch.storage();
        let even = (batch.index_count() + 1) & !1;
        partial(device, BufferStream::Indices, bytemuck::cast_slice(&storage.indices[..even]));
    }
}
