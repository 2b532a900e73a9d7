use crate::coords::Viewport;
use crate::texture::{TextureError, TextureId};

/// Device-resident buffers fed by the batch streams.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferStream {
    /// 2 × f32 per vertex, NDC.
    Positions,
    /// 2 × f32 per vertex, normalized.
    TexCoords,
    /// 4 × f32 per vertex, 0..=255.
    Colors,
    /// u16 per index.
    Indices,
}

/// How an upload relates to the existing device buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UploadMode {
    /// (Re)allocate the buffer at `bytes.len()` and fill it.
    Full,
    /// Overwrite the prefix `[0, bytes.len())`; the tail keeps old contents.
    Partial,
}

/// A span of the bound index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IndexRange {
    pub first_index: u32,
    pub index_count: u32,
}

impl IndexRange {
    /// Offset of the first index in bytes (`u16` indices).
    #[inline]
    pub fn byte_offset(&self) -> u64 {
        self.first_index as u64 * std::mem::size_of::<u16>() as u64
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.first_index + self.index_count
    }
}

/// Tightly packed RGBA8 pixels for a new texture.
#[derive(Debug, Copy, Clone)]
pub struct TextureUpload<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
}

/// What the batching core needs from a graphics backend.
///
/// The sprite program has three vertex inputs (2-float position, 2-float
/// texcoord, 4-float color) and one sampled texture; implementations own that
/// program and the buffers behind [`BufferStream`].
pub trait GraphicsDevice {
    /// Current drawable size in physical pixels.
    fn surface_size(&self) -> (u32, u32);

    /// Starts the frame's color pass: set the viewport, clear the target.
    fn begin_pass(&mut self, viewport: Viewport);

    fn upload(&mut self, stream: BufferStream, bytes: &[u8], mode: UploadMode);

    fn create_texture(&mut self, id: TextureId, upload: TextureUpload<'_>) -> Result<(), TextureError>;

    fn delete_texture(&mut self, id: TextureId);

    fn bind_texture(&mut self, id: TextureId);

    /// Indexed triangle-list draw from the bound index buffer.
    fn draw_indexed(&mut self, range: IndexRange);
}
