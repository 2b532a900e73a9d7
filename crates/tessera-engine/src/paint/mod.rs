//! Vertex color model.
//!
//! Colors travel through the vertex stream in the 0–255 range; the default
//! sprite shader divides by 255 before modulating the sampled texel.

pub mod color;

pub use color::Rgba;
