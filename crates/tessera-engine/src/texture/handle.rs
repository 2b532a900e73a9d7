use std::fmt;
use std::path::PathBuf;

/// Opaque texture handle.
///
/// Handles are plain values; the batch stores them without owning the
/// underlying GPU resource. Deleting a texture while a frame still references
/// it is a caller error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

/// Dimensions of a texture that is resident on the device.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureInfo {
    /// Logical image size.
    pub width: u32,
    pub height: u32,
    /// Allocated size; texture coordinates are normalized by these.
    pub pow_width: u32,
    pub pow_height: u32,
    /// Monotonic creation index.
    pub index: u64,
}

/// Load state of a texture handle.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureState {
    /// File decode in flight. Draws use the placeholder texture.
    Pending { path: PathBuf },
    Ready(TextureInfo),
    /// Load produced nothing usable. Draws use the placeholder texture.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub id: TextureId,
    pub state: TextureState,
}

impl Texture {
    #[inline]
    pub fn info(&self) -> Option<TextureInfo> {
        match &self.state {
            TextureState::Ready(info) => Some(*info),
            _ => None,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, TextureState::Ready(_))
    }
}

/// What a submission needs to know about its texture: which run it belongs to
/// and the extents that normalize texel coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureRef {
    pub id: TextureId,
    pub pow_width: f32,
    pub pow_height: f32,
}

impl TextureRef {
    #[inline]
    pub fn new(id: TextureId, pow_width: u32, pow_height: u32) -> Self {
        Self {
            id,
            pow_width: pow_width as f32,
            pow_height: pow_height as f32,
        }
    }

    #[inline]
    pub fn from_info(id: TextureId, info: TextureInfo) -> Self {
        Self::new(id, info.pow_width, info.pow_height)
    }

    /// Texel → normalized texture coordinate.
    #[inline]
    pub fn normalize(&self, u: f32, v: f32) -> (f32, f32) {
        (u / self.pow_width, v / self.pow_height)
    }
}

/// Padded side length for image-backed textures: the smallest `2 << i`
/// (`i >= 1`) not below `n`. The smallest padded side is therefore 4.
pub fn padded_dimension(n: u32) -> u32 {
    n.max(4).checked_next_power_of_two().unwrap_or(u32::MAX)
}
