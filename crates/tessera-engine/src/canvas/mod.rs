//! The 2D rendering context.
//!
//! [`Canvas2d`] ties together the batch, the texture registry, the frame
//! submitter and a graphics device. It is the surface client code draws on.

mod config;
mod context;
mod error;

pub use config::CanvasConfig;
pub use context::Canvas2d;
pub use error::DrawError;
