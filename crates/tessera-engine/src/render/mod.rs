//! GPU submission of sprite batches.
//!
//! [`FrameSubmitter`] moves a [`SceneBatch`](crate::batch::SceneBatch) through
//! begin/end/render on any [`GraphicsDevice`](crate::device::GraphicsDevice);
//! [`SpriteDevice`] is the wgpu implementation.
//!
//! Convention:
//! - positions reach the GPU already in NDC; the vertex shader passes them through
//! - vertex colors stay in 0..=255 until the vertex shader

mod ctx;
pub mod pipeline;
mod sprite_device;
mod submitter;

pub use ctx::{RenderCtx, RenderTarget};
pub use sprite_device::SpriteDevice;
pub use submitter::FrameSubmitter;
