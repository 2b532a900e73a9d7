use std::fmt;

use crate::batch::BatchError;
use crate::texture::TextureError;

/// A draw call that was rejected. Nothing was added to the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    Batch(BatchError),
    Texture(TextureError),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::Batch(e) => e.fmt(f),
            DrawError::Texture(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::Batch(e) => Some(e),
            DrawError::Texture(e) => Some(e),
        }
    }
}

impl From<BatchError> for DrawError {
    fn from(e: BatchError) -> Self {
        DrawError::Batch(e)
    }
}

impl From<TextureError> for DrawError {
    fn from(e: TextureError) -> Self {
        DrawError::Texture(e)
    }
}
