use super::Vec2;

/// Axis-aligned rectangle (top-left origin).
///
/// Used both for destination rects (surface pixels) and source rects (texels).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Corner coordinates, flat, counter-clockwise from the bottom-left corner:
    /// `(x, y+h), (x+w, y+h), (x+w, y), (x, y)`.
    ///
    /// In +Y-down space the "bottom" edge is `y + h`.
    #[inline]
    pub fn corners_ccw(self) -> [f32; 8] {
        let Vec2 { x: x0, y: y0 } = self.min();
        let Vec2 { x: x1, y: y1 } = self.max();
        [x0, y1, x1, y1, x1, y0, x0, y0]
    }

    /// Same corner order as [`corners_ccw`](Self::corners_ccw), with each axis
    /// divided by the given extents (texel → normalized texture coordinates).
    #[inline]
    pub fn normalized_corners_ccw(self, extent_x: f32, extent_y: f32) -> [f32; 8] {
        let u0 = self.origin.x / extent_x;
        let u1 = (self.origin.x + self.size.x) / extent_x;
        let v0 = self.origin.y / extent_y;
        let v1 = (self.origin.y + self.size.y) / extent_y;
        [u0, v1, u1, v1, u1, v0, u0, v0]
    }
}
