use crate::batch::DEFAULT_TRIANGLE_BUDGET;
use crate::paint::Rgba;

/// Construction-time options of a [`Canvas2d`](super::Canvas2d).
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Linear texture filtering; nearest when off.
    pub smoothing: bool,
    /// Alpha blending; when off, fragments with alpha below one half are discarded
    /// and the rest are written opaque.
    pub blending: bool,
    /// 4× multisampling.
    pub antialias: bool,
    /// Triangles per frame. Sizes every stream of the batch.
    pub triangle_budget: usize,
    /// Color the frame is cleared to, 0..=255 per channel.
    pub clear_color: Rgba,
}

impl CanvasConfig {
    #[inline]
    pub fn sample_count(&self) -> u32 {
        if self.antialias {
            4
        } else {
            1
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            smoothing: false,
            blending: true,
            antialias: false,
            triangle_budget: DEFAULT_TRIANGLE_BUDGET,
            clear_color: Rgba::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = CanvasConfig::default();
        assert!(!c.smoothing);
        assert!(c.blending);
        assert!(!c.antialias);
        assert_eq!(c.triangle_budget, 200_000);
        assert_eq!(c.sample_count(), 1);
    }

    #[test]
    fn antialias_selects_four_samples() {
        let c = CanvasConfig { antialias: true, ..Default::default() };
        assert_eq!(c.sample_count(), 4);
    }
}
