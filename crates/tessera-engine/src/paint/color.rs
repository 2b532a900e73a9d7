/// Straight-alpha RGBA vertex color, channels in `[0, 255]`.
///
/// Stored as `f32` because the color stream is uploaded as-is and the center
/// vertex of a centered quad averages four corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque white, the default tint of `submit_image`.
    pub const WHITE: Rgba = Rgba::new(255.0, 255.0, 255.0, 255.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 255.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32, a as f32)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channels scaled to `[0, 1]`, e.g. for a clear color.
    #[inline]
    pub fn to_unit(self) -> [f32; 4] {
        let inv = 1.0 / 255.0;
        [self.r * inv, self.g * inv, self.b * inv, self.a * inv]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl Default for Rgba {
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Rgba {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}
