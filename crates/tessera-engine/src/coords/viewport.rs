/// Drawable surface size in pixels.
///
/// Transforms use this as the basis for the pixel → NDC conversion.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds a viewport from a physical surface size.
    #[inline]
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// Half extents, the divisors of the NDC conversion.
    #[inline]
    pub fn half_extents(self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}
