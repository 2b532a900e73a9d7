//! In-memory [`GraphicsDevice`] that records every call.

use std::collections::HashMap;

use crate::coords::Viewport;
use crate::texture::{TextureError, TextureId};

use super::{BufferStream, GraphicsDevice, IndexRange, TextureUpload, UploadMode};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DeviceCall {
    BeginPass(Viewport),
    Upload {
        stream: BufferStream,
        len: usize,
        mode: UploadMode,
    },
    CreateTexture {
        id: TextureId,
        width: u32,
        height: u32,
    },
    DeleteTexture(TextureId),
    BindTexture(TextureId),
    Draw(IndexRange),
}

#[derive(Debug)]
pub(crate) struct RecordingDevice {
    pub size: (u32, u32),
    pub calls: Vec<DeviceCall>,
    /// Device-side buffer contents after every upload applied.
    pub buffers: HashMap<BufferStream, Vec<u8>>,
    pub textures: HashMap<TextureId, (u32, u32, Vec<u8>)>,
}

impl RecordingDevice {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            calls: Vec::new(),
            buffers: HashMap::new(),
            textures: HashMap::new(),
        }
    }

    pub fn draws(&self) -> Vec<(TextureId, IndexRange)> {
        let mut bound = None;
        let mut out = Vec::new();
        for call in &self.calls {
            match call {
                DeviceCall::BindTexture(id) => bound = Some(*id),
                DeviceCall::Draw(range) => {
                    if let Some(id) = bound {
                        out.push((id, *range));
                    }
                }
                _ => {}
            }
        }
        out
    }

    pub fn uploads(&self) -> Vec<(BufferStream, usize, UploadMode)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DeviceCall::Upload { stream, len, mode } => Some((*stream, *len, *mode)),
                _ => None,
            })
            .collect()
    }

    pub fn buffer_f32(&self, stream: BufferStream) -> Vec<f32> {
        self.buffers
            .get(&stream)
            .map(|b| {
                b.chunks_exact(4)
                    .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn buffer_u16(&self, stream: BufferStream) -> Vec<u16> {
        self.buffers
            .get(&stream)
            .map(|b| {
                b.chunks_exact(2)
                    .map(|c| u16::from_ne_bytes([c[0], c[1]]))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn begin_pass(&mut self, viewport: Viewport) {
        self.calls.push(DeviceCall::BeginPass(viewport));
    }

    fn upload(&mut self, stream: BufferStream, bytes: &[u8], mode: UploadMode) {
        self.calls.push(DeviceCall::Upload {
            stream,
            len: bytes.len(),
            mode,
        });

        let buffer = self.buffers.entry(stream).or_default();
        match mode {
            UploadMode::Full => *buffer = bytes.to_vec(),
            UploadMode::Partial => {
                assert!(bytes.len() <= buffer.len(), "partial upload past buffer end");
                buffer[..bytes.len()].copy_from_slice(bytes);
            }
        }
    }

    fn create_texture(&mut self, id: TextureId, upload: TextureUpload<'_>) -> Result<(), TextureError> {
        if upload.width == 0 || upload.height == 0 {
            return Err(TextureError::EmptyDimensions {
                width: upload.width,
                height: upload.height,
            });
        }
        self.calls.push(DeviceCall::CreateTexture {
            id,
            width: upload.width,
            height: upload.height,
        });
        self.textures
            .insert(id, (upload.width, upload.height, upload.rgba.to_vec()));
        Ok(())
    }

    fn delete_texture(&mut self, id: TextureId) {
        self.calls.push(DeviceCall::DeleteTexture(id));
        self.textures.remove(&id);
    }

    fn bind_texture(&mut self, id: TextureId) {
        self.calls.push(DeviceCall::BindTexture(id));
    }

    fn draw_indexed(&mut self, range: IndexRange) {
        self.calls.push(DeviceCall::Draw(range));
    }
}
