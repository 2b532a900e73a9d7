//! Coordinate and geometry types shared by the batch, transforms and device.
//!
//! Canonical CPU space:
//! - Surface pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Transforms map this space to NDC (+Y up) before vertices are packed.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
