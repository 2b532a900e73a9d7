use crate::coords::Viewport;

use super::{to_ndc, PointTransform};

/// Six-scalar 2D map: scale, shear, offset.
///
/// Mutators compose into the current values instead of replacing them:
/// scales multiply, shears and offsets add. This is a simplified composition,
/// not a 3×3 matrix product, so chains are order-sensitive in a way a true
/// affine product would not be.
///
/// Mapping of a point `(x, y)`:
///
/// ```text
/// x' = x·x_scale + y·y_shear + x_offset
/// y' = y·y_scale + x·x_shear + y_offset
/// ```
///
/// The shear terms read the *input* coordinates, and each shear field feeds
/// the opposite axis. `rotate` relies on this layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AffineTransform {
    pub x_scale: f32,
    pub x_shear: f32,
    pub y_shear: f32,
    pub y_scale: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl AffineTransform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x_scale: 1.0,
            x_shear: 0.0,
            y_shear: 0.0,
            y_scale: 1.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }

    #[inline]
    pub fn translate(&mut self, x: f32, y: f32) {
        self.x_offset += x;
        self.y_offset += y;
    }

    #[inline]
    pub fn scale(&mut self, x: f32, y: f32) {
        self.x_scale *= x;
        self.y_scale *= y;
    }

    #[inline]
    pub fn shear(&mut self, x: f32, y: f32) {
        self.x_shear += x;
        self.y_shear += y;
    }

    /// Composes a rotation about the origin (degrees, clockwise on screen).
    pub fn rotate(&mut self, angle_degrees: f32) {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        self.transform(cos, sin, -sin, cos, 0.0, 0.0);
    }

    /// Composes six scalars: scales multiply, shears and offsets add.
    pub fn transform(
        &mut self,
        x_scale: f32,
        x_shear: f32,
        y_shear: f32,
        y_scale: f32,
        x_offset: f32,
        y_offset: f32,
    ) {
        self.x_scale *= x_scale;
        self.x_shear += x_shear;
        self.y_shear += y_shear;
        self.y_scale *= y_scale;
        self.x_offset += x_offset;
        self.y_offset += y_offset;
    }

    /// Replaces all six scalars.
    pub fn set_transform(
        &mut self,
        x_scale: f32,
        x_shear: f32,
        y_shear: f32,
        y_scale: f32,
        x_offset: f32,
        y_offset: f32,
    ) {
        *self = Self {
            x_scale,
            x_shear,
            y_shear,
            y_scale,
            x_offset,
            y_offset,
        };
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Maps one point into surface pixels (before NDC conversion).
    #[inline]
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        let mut mx = x * self.x_scale;
        let mut my = y * self.y_scale;
        mx += y * self.y_shear;
        my += x * self.x_shear;
        (mx + self.x_offset, my + self.y_offset)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PointTransform for AffineTransform {
    fn apply_into(&self, points: &[f32], viewport: Viewport, out: &mut [f32]) {
        debug_assert_eq!(points.len() % 2, 0, "points must be x/y pairs");
        debug_assert_eq!(points.len(), out.len());

        let (half_w, half_h) = viewport.half_extents();
        for (src, dst) in points.chunks_exact(2).zip(out.chunks_exact_mut(2)) {
            let (x, y) = self.map_point(src[0], src[1]);
            let (nx, ny) = to_ndc(x, y, half_w, half_h);
            dst[0] = nx;
            dst[1] = ny;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(640.0, 480.0);

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn assert_points(got: &[f32], want: &[f32]) {
        assert_eq!(got.len(), want.len());
        for (g, w) in got.iter().zip(want) {
            assert!(approx(*g, *w), "got {got:?}, want {want:?}");
        }
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn translate_then_apply_matches_closed_form() {
        let (tx, ty) = (12.5, -7.0);
        let mut m = AffineTransform::identity();
        m.translate(tx, ty);

        let pts = [0.0, 0.0, 100.0, 50.0, 640.0, 480.0, -3.0, 9.0];
        let out = m.apply(&pts, VP);
        for (p, o) in pts.chunks_exact(2).zip(out.chunks_exact(2)) {
            assert_eq!(o[0], -1.0 + (p[0] + tx) / (VP.width / 2.0));
            assert_eq!(o[1], 1.0 - (p[1] + ty) / (VP.height / 2.0));
        }
    }

    #[test]
    fn translate_accumulates() {
        let mut m = AffineTransform::identity();
        m.translate(1.0, 2.0);
        m.translate(3.0, 4.0);
        assert_eq!((m.x_offset, m.y_offset), (4.0, 6.0));
    }

    #[test]
    fn scale_multiplies() {
        let mut m = AffineTransform::identity();
        m.scale(2.0, 3.0);
        m.scale(0.5, 2.0);
        assert_eq!((m.x_scale, m.y_scale), (1.0, 6.0));
    }

    #[test]
    fn offsets_are_not_scaled_by_later_scale() {
        // Simplified composition: translate then scale leaves the offset intact.
        let mut m = AffineTransform::identity();
        m.translate(10.0, 10.0);
        m.scale(2.0, 2.0);
        assert_eq!(m.map_point(1.0, 1.0), (12.0, 12.0));
    }

    #[test]
    fn transform_multiplies_scales_and_adds_the_rest() {
        let mut m = AffineTransform::identity();
        m.set_transform(2.0, 0.5, 0.25, 3.0, 1.0, 1.0);
        m.transform(2.0, 0.5, 0.25, 2.0, 4.0, 5.0);
        assert_eq!(m, AffineTransform {
            x_scale: 4.0,
            x_shear: 1.0,
            y_shear: 0.5,
            y_scale: 6.0,
            x_offset: 5.0,
            y_offset: 6.0,
        });
    }

    #[test]
    fn set_transform_replaces_everything() {
        let mut m = AffineTransform::identity();
        m.translate(100.0, 100.0);
        m.scale(9.0, 9.0);
        m.set_transform(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(m.map_point(1.0, 1.0), (1.0 + 3.0 + 5.0, 4.0 + 2.0 + 6.0));
    }

    #[test]
    fn reset_then_apply_is_plain_ndc_conversion() {
        let mut m = AffineTransform::identity();
        m.translate(5.0, 6.0);
        m.scale(2.0, 2.0);
        m.shear(0.3, 0.1);
        m.reset();
        assert!(m.is_identity());

        let out = m.apply(&[0.0, 0.0, 320.0, 240.0, 640.0, 480.0], VP);
        assert_eq!(out, vec![-1.0, 1.0, 0.0, 0.0, 1.0, -1.0]);
    }

    #[test]
    fn clone_is_independent() {
        let mut a = AffineTransform::identity();
        a.translate(1.0, 1.0);
        let mut b = a;
        b.translate(5.0, 5.0);
        assert_eq!(a.x_offset, 1.0);
        assert_eq!(b.x_offset, 6.0);
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn rotate_quarter_turn_maps_x_axis_onto_y_axis() {
        let mut m = AffineTransform::identity();
        m.rotate(90.0);
        let (x, y) = m.map_point(10.0, 0.0);
        assert!(approx(x, 0.0) && approx(y, 10.0), "({x}, {y})");
        let (x, y) = m.map_point(0.0, 10.0);
        assert!(approx(x, -10.0) && approx(y, 0.0), "({x}, {y})");
    }

    #[test]
    fn rotate_composes_through_transform() {
        let mut m = AffineTransform::identity();
        m.rotate(30.0);
        let (sin, cos) = 30.0f32.to_radians().sin_cos();
        assert!(approx(m.x_scale, cos) && approx(m.y_scale, cos));
        assert!(approx(m.x_shear, sin) && approx(m.y_shear, -sin));
    }

    // ── shear (reproduced asymmetry) ──────────────────────────────────────

    #[test]
    fn shear_reads_unscaled_input_coordinates() {
        // Known, reproduced behavior: shear terms use the pre-scale x/y even when
        // a scale is active, and each shear field drives the opposite axis.
        let mut m = AffineTransform::identity();
        m.scale(2.0, 3.0);
        m.shear(0.5, 0.25);
        let (x, y) = m.map_point(4.0, 8.0);
        assert_eq!(x, 4.0 * 2.0 + 8.0 * 0.25);
        assert_eq!(y, 8.0 * 3.0 + 4.0 * 0.5);
    }

    #[test]
    fn shear_x_field_only_moves_y() {
        let mut m = AffineTransform::identity();
        m.shear(1.0, 0.0);
        assert_eq!(m.map_point(3.0, 5.0), (3.0, 8.0));
    }

    #[test]
    fn apply_does_not_mutate_inputs() {
        let mut m = AffineTransform::identity();
        m.translate(2.0, 2.0);
        let before = m;
        let pts = [1.0, 1.0];
        let out = m.apply(&pts, VP);
        assert_eq!(m, before);
        assert_eq!(pts, [1.0, 1.0]);
        assert_points(&out, &[-1.0 + 3.0 / 320.0, 1.0 - 3.0 / 240.0]);
    }
}
