//! Sprite batching: packs submissions into flat vertex/index streams and
//! groups the emitted triangles into texture-contiguous runs.
//!
//! Responsibilities:
//! - fixed-capacity stream arenas, reused every frame
//! - per-vertex transform into NDC via the active [`Transform`](crate::transform::Transform)
//! - greedy run coalescing in submission order
//!
//! Non-goals:
//! - sorting by texture (submission order is the caller's batching policy)
//! - GPU upload (see `render::FrameSubmitter`)

mod arena;
mod error;
mod runs;
mod scene;

pub use error::{BatchError, StreamKind};
pub use runs::{RunList, TextureRun};
pub use scene::{BatchStats, SceneBatch, StreamStorage, DEFAULT_TRIANGLE_BUDGET, MAX_VERTICES};
