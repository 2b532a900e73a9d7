//! Graphics device layer.
//!
//! Responsibilities:
//! - the [`GraphicsDevice`] contract the frame submitter draws through
//! - creating the wgpu Instance/Adapter/Device/Queue and the window surface
//! - acquiring frames and mapping surface errors to runtime actions

mod error;
mod frame;
mod gpu;
mod graphics;
mod init;
mod surface;

#[cfg(test)]
pub(crate) mod recording;

pub use error::{DeviceError, ShaderLinkError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use graphics::{BufferStream, GraphicsDevice, IndexRange, TextureUpload, UploadMode};
pub use init::GpuInit;
