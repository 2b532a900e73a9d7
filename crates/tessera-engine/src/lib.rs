//! Tessera: a texture-run sprite batching renderer on wgpu.
//!
//! Geometry submitted to a [`Canvas2d`] is transformed into normalized device
//! coordinates on the CPU, packed into fixed-capacity vertex/index streams, and
//! grouped into runs of consecutive draws that share a texture. Each frame
//! uploads the written streams once and issues one indexed draw per run.
//!
//! The platform runtime (`window`, `core`, `time`) hosts canvases in winit
//! windows; the batching core (`batch`, `transform`, `texture`) depends only
//! on the [`GraphicsDevice`] trait.

pub mod batch;
pub mod canvas;
pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod texture;
pub mod time;
pub mod transform;
pub mod window;

pub use canvas::{Canvas2d, CanvasConfig, DrawError};
pub use device::GraphicsDevice;
