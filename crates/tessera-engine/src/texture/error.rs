use std::fmt;

use super::TextureId;

/// Failure to create or use a texture.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureError {
    /// Width or height is zero.
    EmptyDimensions { width: u32, height: u32 },
    /// Pixel data holds fewer bytes than even an RGB image of this size.
    DataTooShort { expected: usize, actual: usize },
    /// Larger than the device's maximum 2D texture side.
    TooLarge { width: u32, height: u32, max: u32 },
    /// A file could not be read or decoded.
    Decode(String),
    /// The handle is not (or no longer) known.
    UnknownTexture(TextureId),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::EmptyDimensions { width, height } => {
                write!(f, "cannot create a {width}x{height} texture")
            }
            TextureError::DataTooShort { expected, actual } => {
                write!(f, "pixel data too short: expected at least {expected} bytes, got {actual}")
            }
            TextureError::TooLarge { width, height, max } => {
                write!(f, "texture {width}x{height} exceeds the device limit of {max}")
            }
            TextureError::Decode(msg) => write!(f, "texture decode failed: {msg}"),
            TextureError::UnknownTexture(id) => write!(f, "unknown texture {id}"),
        }
    }
}

impl std::error::Error for TextureError {}
