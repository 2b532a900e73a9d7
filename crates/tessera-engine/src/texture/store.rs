use std::collections::HashMap;
use std::path::PathBuf;

use super::{Texture, TextureError, TextureId, TextureInfo, TextureRef, TextureState};

/// Registry of texture handles and their load state.
///
/// Hands out ids, assigns creation indices when a texture becomes ready, and
/// resolves handles for submission, substituting the placeholder for textures
/// that are still loading or failed to load.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: HashMap<TextureId, Texture>,
    next_id: u64,
    next_index: u64,
    placeholder: Option<TextureId>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a fresh id. The id is not registered until it is marked.
    pub fn allocate_id(&mut self) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a file-backed texture whose decode has not finished.
    pub fn insert_pending(&mut self, path: PathBuf) -> TextureId {
        let id = self.allocate_id();
        self.textures.insert(
            id,
            Texture {
                id,
                state: TextureState::Pending { path },
            },
        );
        id
    }

    /// Marks `id` as resident and assigns the next creation index.
    pub fn mark_ready(
        &mut self,
        id: TextureId,
        width: u32,
        height: u32,
        pow_width: u32,
        pow_height: u32,
    ) -> TextureInfo {
        let info = TextureInfo {
            width,
            height,
            pow_width,
            pow_height,
            index: self.next_index,
        };
        self.next_index += 1;

        self.textures.insert(
            id,
            Texture {
                id,
                state: TextureState::Ready(info),
            },
        );
        info
    }

    pub fn mark_failed(&mut self, id: TextureId, reason: impl Into<String>) {
        self.textures.insert(
            id,
            Texture {
                id,
                state: TextureState::Failed {
                    reason: reason.into(),
                },
            },
        );
    }

    pub fn remove(&mut self, id: TextureId) -> Option<Texture> {
        if self.placeholder == Some(id) {
            self.placeholder = None;
        }
        self.textures.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    #[inline]
    pub fn is_pending(&self, id: TextureId) -> bool {
        matches!(
            self.textures.get(&id).map(|t| &t.state),
            Some(TextureState::Pending { .. })
        )
    }

    /// Uses a ready texture as the stand-in for pending/failed handles.
    pub fn set_placeholder(&mut self, id: TextureId) -> Result<(), TextureError> {
        match self.textures.get(&id) {
            Some(t) if t.is_ready() => {
                self.placeholder = Some(id);
                Ok(())
            }
            _ => Err(TextureError::UnknownTexture(id)),
        }
    }

    #[inline]
    pub fn placeholder(&self) -> Option<TextureId> {
        self.placeholder
    }

    /// Resolves a handle to what a submission needs.
    ///
    /// Pending and failed textures resolve to the placeholder.
    pub fn resolve(&self, id: TextureId) -> Result<TextureRef, TextureError> {
        let texture = self
            .textures
            .get(&id)
            .ok_or(TextureError::UnknownTexture(id))?;

        match texture.state {
            TextureState::Ready(info) => Ok(TextureRef::from_info(id, info)),
            TextureState::Pending { .. } | TextureState::Failed { .. } => {
                let placeholder = self.placeholder.ok_or(TextureError::UnknownTexture(id))?;
                match self.textures.get(&placeholder).and_then(Texture::info) {
                    Some(info) => Ok(TextureRef::from_info(placeholder, info)),
                    None => Err(TextureError::UnknownTexture(placeholder)),
                }
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
