//! Texture handles and their lifecycle.
//!
//! Responsibilities:
//! - opaque [`TextureId`] handles owned by the caller, referenced by the batch
//! - load state per handle ([`TextureState`]): pending file loads, ready, failed
//! - CPU-side pixel preparation (RGB expansion, power-of-two padding)
//! - background decoding for file-backed textures
//!
//! GPU residency lives behind `device::GraphicsDevice`.

mod error;
mod handle;
mod loader;
mod pixels;
mod store;

pub use error::TextureError;
pub use handle::{padded_dimension, Texture, TextureId, TextureInfo, TextureRef, TextureState};
pub use loader::{FileLoader, LoadOutcome};
pub use pixels::{expand_to_rgba, pad_to_power_of_two, PaddedImage};
pub use store::TextureStore;
