//! Single-window runtime: owns the `winit` event loop, the window and its `Gpu`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
