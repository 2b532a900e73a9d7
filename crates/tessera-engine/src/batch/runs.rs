use crate::texture::TextureId;

/// A maximal span of consecutive triangles sharing one texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureRun {
    pub texture: TextureId,
    pub triangles: u32,
}

impl TextureRun {
    /// Indices covered by this run.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.triangles * 3
    }
}

/// Per-frame run list with greedy coalescing.
///
/// Adjacent submissions with the same texture extend the current run; any
/// other texture starts a new one. Interleaving two textures therefore yields
/// one run per submission.
#[derive(Debug, Default)]
pub struct RunList {
    runs: Vec<TextureRun>,
    last: Option<TextureId>,
}

impl RunList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all runs and forgets the last texture. Keeps capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.runs.clear();
        self.last = None;
    }

    pub fn record(&mut self, texture: TextureId, triangles: u32) {
        if self.last == Some(texture) {
            if let Some(run) = self.runs.last_mut() {
                run.triangles += triangles;
                return;
            }
        }
        self.runs.push(TextureRun { texture, triangles });
        self.last = Some(texture);
    }

    #[inline]
    pub fn as_slice(&self) -> &[TextureRun] {
        &self.runs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[inline]
    pub fn last_texture(&self) -> Option<TextureId> {
        self.last
    }

    pub fn total_triangles(&self) -> u64 {
        self.runs.iter().map(|r| r.triangles as u64).sum()
    }
}
