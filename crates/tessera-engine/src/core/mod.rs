//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and applications that
//! draw with a [`Canvas2d`](crate::canvas::Canvas2d).

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
