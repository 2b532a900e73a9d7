use crate::coords::{Rect, Viewport};
use crate::paint::Rgba;
use crate::texture::TextureRef;
use crate::transform::{PointTransform, Transform};

use super::arena::Arena;
use super::{BatchError, RunList, StreamKind, TextureRun};

/// Triangles per frame when no budget is configured.
pub const DEFAULT_TRIANGLE_BUDGET: usize = 200_000;

/// Vertices addressable by 16-bit indices.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Counters for one frame of submissions.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BatchStats {
    pub triangles: usize,
    pub vertices: usize,
    /// One draw call per run.
    pub runs: usize,
}

/// Per-frame sprite batch.
///
/// Owns three parallel vertex streams (position, texcoord, color), a `u16`
/// index stream and the texture run list. All storage is allocated once from
/// the triangle budget; [`reset`](Self::reset) rewinds the cursors.
///
/// Every `submit_*` call either writes a whole shape or nothing: capacity and
/// input lengths are checked before the first slot is claimed.
#[derive(Debug)]
pub struct SceneBatch {
    transform: Transform,
    viewport: Viewport,

    positions: Arena<f32>,
    tex_coords: Arena<f32>,
    colors: Arena<f32>,
    indices: Arena<u16>,

    runs: RunList,

    /// Transformed destination points, reused across submissions.
    scratch: Vec<f32>,
}

impl SceneBatch {
    /// Allocates streams for `triangle_budget` triangles.
    ///
    /// Index capacity is `3 * budget` rounded up to an even count. Vertex
    /// capacity is `2 * budget`, capped at [`MAX_VERTICES`].
    pub fn new(triangle_budget: usize) -> Self {
        let budget = triangle_budget.max(1);
        let vertices = budget.saturating_mul(2).min(MAX_VERTICES);
        let indices = budget.saturating_mul(3).saturating_add(1) & !1;

        Self {
            transform: Transform::default(),
            viewport: Viewport::default(),
            positions: Arena::with_capacity(vertices * 2),
            tex_coords: Arena::with_capacity(vertices * 2),
            colors: Arena::with_capacity(vertices * 4),
            indices: Arena::with_capacity(indices),
            runs: RunList::new(),
            scratch: Vec::with_capacity(64),
        }
    }

    /// Starts a new frame: cursors to zero, runs cleared, viewport replaced.
    ///
    /// The transform is left alone; it belongs to the caller's drawing state.
    pub fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.positions.clear();
        self.tex_coords.clear();
        self.colors.clear();
        self.indices.clear();
        self.runs.clear();
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn set_transform(&mut self, transform: impl Into<Transform>) {
        self.transform = transform.into();
    }

    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.positions.capacity() / 2
    }

    #[inline]
    pub fn index_capacity(&self) -> usize {
        self.indices.capacity()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Written positions, NDC, two floats per vertex.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        self.positions.written()
    }

    /// Written texture coordinates, normalized, two floats per vertex.
    #[inline]
    pub fn tex_coords(&self) -> &[f32] {
        self.tex_coords.written()
    }

    /// Written colors, 0..=255 per channel, four floats per vertex.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        self.colors.written()
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        self.indices.written()
    }

    #[inline]
    pub fn runs(&self) -> &[TextureRun] {
        self.runs.as_slice()
    }

    /// Full backing storage of every stream, for sizing device buffers.
    pub fn storage(&self) -> StreamStorage<'_> {
        StreamStorage {
            positions: self.positions.storage(),
            tex_coords: self.tex_coords.storage(),
            colors: self.colors.storage(),
            indices: self.indices.storage(),
        }
    }

    pub fn stats(&self) -> BatchStats {
        BatchStats {
            triangles: self.triangle_count(),
            vertices: self.vertex_count(),
            runs: self.runs.len(),
        }
    }

    // ── submissions ───────────────────────────────────────────────────────

    /// One triangle: three texel points, three local points, three colors.
    pub fn submit_triangle(
        &mut self,
        texture: TextureRef,
        src: &[f32; 6],
        dst: &[f32; 6],
        colors: &[f32; 12],
    ) -> Result<(), BatchError> {
        self.ensure_room(3, 1)?;

        let base = self.write_vertices(&texture, src, dst, colors);
        self.indices.push_slice(&[base, base + 1, base + 2]);
        self.runs.record(texture.id, 1);
        Ok(())
    }

    /// Convex polygon of `n >= 3` points, fanned around the first point.
    ///
    /// Emits `n - 2` triangles `(0, k+1, k+2)`.
    pub fn submit_triangle_fan(
        &mut self,
        texture: TextureRef,
        src: &[f32],
        dst: &[f32],
        colors: &[f32],
    ) -> Result<(), BatchError> {
        if dst.len() % 2 != 0 {
            return Err(BatchError::invalid(format!(
                "odd coordinate count {}",
                dst.len()
            )));
        }
        let n = dst.len() / 2;
        if n < 3 {
            return Err(BatchError::invalid(format!(
                "triangle fan needs at least 3 points, got {n}"
            )));
        }
        if src.len() != dst.len() {
            return Err(BatchError::invalid(format!(
                "{} source coordinates for {} destination coordinates",
                src.len(),
                dst.len()
            )));
        }
        if colors.len() != n * 4 {
            return Err(BatchError::invalid(format!(
                "{} color components for {n} points",
                colors.len()
            )));
        }

        let triangles = n - 2;
        self.ensure_room(n, triangles)?;

        let base = self.write_vertices(&texture, src, dst, colors);
        let fan = self.indices.claim(triangles * 3);
        for (k, tri) in fan.chunks_exact_mut(3).enumerate() {
            let k = k as u16;
            tri.copy_from_slice(&[base, base + k + 1, base + k + 2]);
        }
        self.runs.record(texture.id, triangles as u32);
        Ok(())
    }

    /// Quad split into four triangles around a synthesized center vertex.
    ///
    /// The center's position, texcoord and color are each the mean of the four
    /// corners (positions averaged after the transform).
    pub fn submit_quad_centered(
        &mut self,
        texture: TextureRef,
        src: &[f32; 8],
        dst: &[f32; 8],
        colors: &[f32; 16],
    ) -> Result<(), BatchError> {
        self.ensure_room(5, 4)?;

        let base = self.write_vertices(&texture, src, dst, colors);

        let position = corner_mean::<2>(last_n(self.positions.written(), 8));
        let tex_coord = corner_mean::<2>(last_n(self.tex_coords.written(), 8));
        let color = corner_mean::<4>(last_n(self.colors.written(), 16));
        self.positions.push_slice(&position);
        self.tex_coords.push_slice(&tex_coord);
        self.colors.push_slice(&color);

        let c = base + 4;
        self.indices.push_slice(&[base, base + 1, c]);
        self.indices.push_slice(&[base + 1, base + 2, c]);
        self.indices.push_slice(&[base + 2, base + 3, c]);
        self.indices.push_slice(&[base + 3, base, c]);
        self.runs.record(texture.id, 4);
        Ok(())
    }

    /// Textured rectangle: the hot path.
    ///
    /// Corners run counter-clockwise from the bottom-left of `dst`; `src` is in
    /// texels. `color` tints all four vertices.
    pub fn submit_image(
        &mut self,
        texture: TextureRef,
        src: Rect,
        dst: Rect,
        color: Rgba,
    ) -> Result<(), BatchError> {
        self.ensure_room(4, 2)?;

        let c = color.to_array();
        let mut colors = [0.0f32; 16];
        for corner in colors.chunks_exact_mut(4) {
            corner.copy_from_slice(&c);
        }

        let base = self.write_vertices(&texture, &src.corners_ccw(), &dst.corners_ccw(), &colors);
        self.indices
            .push_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.runs.record(texture.id, 2);
        Ok(())
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn ensure_room(&self, vertices: usize, triangles: usize) -> Result<(), BatchError> {
        let available = self.vertex_capacity() - self.vertex_count();
        if vertices > available {
            return Err(BatchError::CapacityExceeded {
                stream: StreamKind::Vertices,
                requested: vertices,
                available,
            });
        }

        let indices = triangles * 3;
        let available = self.indices.remaining();
        if indices > available {
            return Err(BatchError::CapacityExceeded {
                stream: StreamKind::Indices,
                requested: indices,
                available,
            });
        }
        Ok(())
    }

    /// Appends one vertex per point and returns the index of the first.
    ///
    /// Room was checked by [`ensure_room`](Self::ensure_room); the vertex
    /// cursor therefore stays below [`MAX_VERTICES`] and fits a `u16`.
    fn write_vertices(
        &mut self,
        texture: &TextureRef,
        src: &[f32],
        dst: &[f32],
        colors: &[f32],
    ) -> u16 {
        debug_assert!(self.vertex_count() < MAX_VERTICES);
        let base = self.vertex_count() as u16;

        self.scratch.clear();
        self.scratch.resize(dst.len(), 0.0);
        self.transform.apply_into(dst, self.viewport, &mut self.scratch);
        self.positions.push_slice(&self.scratch);

        let uv = self.tex_coords.claim(src.len());
        for (out, texel) in uv.chunks_exact_mut(2).zip(src.chunks_exact(2)) {
            let (u, v) = texture.normalize(texel[0], texel[1]);
            out[0] = u;
            out[1] = v;
        }

        self.colors.push_slice(colors);
        base
    }
}

impl Default for SceneBatch {
    fn default() -> Self {
        Self::new(DEFAULT_TRIANGLE_BUDGET)
    }
}

/// Whole-capacity views of the batch streams.
#[derive(Debug, Copy, Clone)]
pub struct StreamStorage<'a> {
    pub positions: &'a [f32],
    pub tex_coords: &'a [f32],
    pub colors: &'a [f32],
    pub indices: &'a [u16],
}

#[inline]
fn last_n(stream: &[f32], n: usize) -> &[f32] {
    &stream[stream.len() - n..]
}

/// Mean of four `N`-component corners.
fn corner_mean<const N: usize>(corners: &[f32]) -> [f32; N] {
    let mut sum = [0.0f32; N];
    for corner in corners.chunks_exact(N) {
        for (s, c) in sum.iter_mut().zip(corner) {
            *s += c;
        }
    }
    sum.map(|s| s * 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureId;
    use crate::transform::{AffineTransform, TransformCommandList};

    const VP: Viewport = Viewport::new(200.0, 100.0);

    fn tex(id: u64) -> TextureRef {
        TextureRef::new(TextureId(id), 64, 64)
    }

    fn batch() -> SceneBatch {
        let mut b = SceneBatch::new(1_000);
        b.reset(VP);
        b
    }

    fn approx(a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    fn fan_input(n: usize) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        let src: Vec<f32> = (0..n * 2).map(|i| i as f32).collect();
        let dst: Vec<f32> = (0..n * 2).map(|i| (i * 10) as f32).collect();
        let colors = vec![255.0; n * 4];
        (src, dst, colors)
    }

    // ── capacity layout ───────────────────────────────────────────────────

    #[test]
    fn capacities_follow_budget() {
        let b = SceneBatch::new(1_000);
        assert_eq!(b.vertex_capacity(), 2_000);
        assert_eq!(b.index_capacity(), 3_000);
    }

    #[test]
    fn index_capacity_is_even() {
        assert_eq!(SceneBatch::new(1).index_capacity(), 4);
        assert_eq!(SceneBatch::new(3).index_capacity(), 10);
    }

    #[test]
    fn vertex_capacity_capped_by_u16_indices() {
        let b = SceneBatch::default();
        assert_eq!(b.vertex_capacity(), MAX_VERTICES);
        assert_eq!(b.index_capacity(), DEFAULT_TRIANGLE_BUDGET * 3);
    }

    // ── submit_image ──────────────────────────────────────────────────────

    #[test]
    fn full_viewport_image_maps_to_ndc_corners() {
        let mut b = batch();
        b.submit_image(
            tex(1),
            Rect::new(0.0, 0.0, 64.0, 64.0),
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Rgba::WHITE,
        )
        .unwrap();

        // bottom-left, bottom-right, top-right, top-left
        assert_eq!(b.positions(), &[-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0]);
        assert_eq!(b.tex_coords(), &[0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(b.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(b.colors(), &[255.0; 16]);
    }

    #[test]
    fn image_color_tints_every_vertex() {
        let mut b = batch();
        let tint = Rgba::new(10.0, 20.0, 30.0, 40.0);
        b.submit_image(tex(1), Rect::new(0.0, 0.0, 8.0, 8.0), Rect::new(5.0, 5.0, 8.0, 8.0), tint)
            .unwrap();

        for c in b.colors().chunks_exact(4) {
            assert_eq!(c, &[10.0, 20.0, 30.0, 40.0]);
        }
    }

    #[test]
    fn second_image_indices_offset_by_vertex_cursor() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        assert_eq!(&b.indices()[6..], &[4, 5, 6, 4, 6, 7]);
    }

    // ── run coalescing ────────────────────────────────────────────────────

    #[test]
    fn same_texture_images_share_one_run() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();

        assert_eq!(b.runs(), &[TextureRun { texture: TextureId(1), triangles: 4 }]);
    }

    #[test]
    fn different_textures_split_runs_in_order() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        b.submit_image(tex(2), r, r, Rgba::WHITE).unwrap();

        assert_eq!(
            b.runs(),
            &[
                TextureRun { texture: TextureId(1), triangles: 2 },
                TextureRun { texture: TextureId(2), triangles: 2 },
            ]
        );
    }

    #[test]
    fn coalescing_spans_submission_kinds() {
        let mut b = batch();
        let (src, dst, colors) = fan_input(5);
        b.submit_triangle_fan(tex(1), &src, &dst, &colors).unwrap();
        b.submit_triangle(tex(1), &[0.0; 6], &[0.0; 6], &[0.0; 12]).unwrap();
        b.submit_quad_centered(tex(1), &[0.0; 8], &[0.0; 8], &[0.0; 16]).unwrap();

        assert_eq!(b.runs(), &[TextureRun { texture: TextureId(1), triangles: 8 }]);
    }

    #[test]
    fn reset_starts_fresh_run_list() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        b.reset(VP);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        assert_eq!(b.runs(), &[TextureRun { texture: TextureId(1), triangles: 2 }]);
    }

    // ── triangle fans ─────────────────────────────────────────────────────

    #[test]
    fn fan_emits_n_minus_two_triangles() {
        let mut b = batch();
        let (src, dst, colors) = fan_input(5);
        b.submit_triangle_fan(tex(1), &src, &dst, &colors).unwrap();

        assert_eq!(b.vertex_count(), 5);
        assert_eq!(b.triangle_count(), 3);
        assert_eq!(b.indices(), &[0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn three_point_fan_matches_single_triangle() {
        let src = [0.0, 0.0, 32.0, 0.0, 32.0, 16.0];
        let dst = [10.0, 10.0, 50.0, 10.0, 50.0, 30.0];
        let colors = [255.0, 0.0, 0.0, 255.0, 0.0, 255.0, 0.0, 255.0, 0.0, 0.0, 255.0, 128.0];

        let mut fan = batch();
        fan.submit_triangle_fan(tex(1), &src, &dst, &colors).unwrap();
        let mut tri = batch();
        tri.submit_triangle(tex(1), &src, &dst, &colors).unwrap();

        assert_eq!(fan.positions(), tri.positions());
        assert_eq!(fan.tex_coords(), tri.tex_coords());
        assert_eq!(fan.colors(), tri.colors());
        assert_eq!(fan.indices(), tri.indices());
        assert_eq!(fan.runs(), tri.runs());
    }

    #[test]
    fn malformed_fans_are_rejected() {
        let mut b = batch();
        let (src, dst, colors) = fan_input(2);
        assert!(matches!(
            b.submit_triangle_fan(tex(1), &src, &dst, &colors),
            Err(BatchError::InvalidGeometry { .. })
        ));

        let (src, dst, _) = fan_input(4);
        assert!(matches!(
            b.submit_triangle_fan(tex(1), &src, &dst, &[0.0; 12]),
            Err(BatchError::InvalidGeometry { .. })
        ));

        assert!(matches!(
            b.submit_triangle_fan(tex(1), &src[..7], &dst[..7], &[0.0; 12]),
            Err(BatchError::InvalidGeometry { .. })
        ));

        assert_eq!(b.stats(), BatchStats::default());
    }

    // ── centered quads ────────────────────────────────────────────────────

    #[test]
    fn centered_quad_center_is_corner_mean() {
        let mut b = SceneBatch::new(100);
        b.reset(Viewport::new(20.0, 20.0));

        let dst = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];
        let src = [0.0, 0.0, 64.0, 0.0, 64.0, 64.0, 0.0, 64.0];
        let colors = [
            0.0, 0.0, 0.0, 255.0, //
            100.0, 0.0, 0.0, 255.0, //
            100.0, 200.0, 0.0, 255.0, //
            0.0, 200.0, 40.0, 255.0,
        ];
        b.submit_quad_centered(tex(1), &src, &dst, &colors).unwrap();

        assert_eq!(b.vertex_count(), 5);
        assert_eq!(b.triangle_count(), 4);
        assert!(approx(&b.positions()[8..], &[-0.5, 0.5]));
        assert!(approx(&b.tex_coords()[8..], &[0.5, 0.5]));
        assert!(approx(&b.colors()[16..], &[50.0, 100.0, 10.0, 255.0]));
        assert_eq!(b.indices(), &[0, 1, 4, 1, 2, 4, 2, 3, 4, 3, 0, 4]);
    }

    #[test]
    fn centered_quad_indices_follow_vertex_cursor() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        b.submit_quad_centered(tex(1), &[0.0; 8], &[0.0; 8], &[0.0; 16]).unwrap();

        assert_eq!(&b.indices()[6..], &[4, 5, 8, 5, 6, 8, 6, 7, 8, 7, 4, 8]);
    }

    // ── cursors ───────────────────────────────────────────────────────────

    #[test]
    fn cursors_zero_after_reset() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        b.reset(VP);

        assert_eq!(b.vertex_count(), 0);
        assert_eq!(b.index_count(), 0);
        assert!(b.runs().is_empty());
        assert!(b.positions().is_empty());
    }

    #[test]
    fn cursors_sum_submission_sizes() {
        let mut b = batch();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        let (src, dst, colors) = fan_input(5);

        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        b.submit_triangle_fan(tex(2), &src, &dst, &colors).unwrap();
        b.submit_quad_centered(tex(1), &[0.0; 8], &[0.0; 8], &[0.0; 16]).unwrap();
        b.submit_triangle(tex(3), &[0.0; 6], &[0.0; 6], &[0.0; 12]).unwrap();

        assert_eq!(
            b.stats(),
            BatchStats { triangles: 2 + 3 + 4 + 1, vertices: 4 + 5 + 5 + 3, runs: 4 }
        );
        assert_eq!(b.index_count(), 30);
        assert_eq!(b.tex_coords().len(), 17 * 2);
        assert_eq!(b.colors().len(), 17 * 4);
    }

    #[test]
    fn indices_stay_below_vertex_cursor() {
        let mut b = batch();
        let (src, dst, colors) = fan_input(7);
        b.submit_triangle_fan(tex(1), &src, &dst, &colors).unwrap();
        b.submit_quad_centered(tex(1), &[0.0; 8], &[0.0; 8], &[0.0; 16]).unwrap();

        let cursor = b.vertex_count() as u16;
        assert!(b.indices().iter().all(|&i| i < cursor));
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn vertex_overflow_rejects_without_writing() {
        let mut b = SceneBatch::new(2);
        b.reset(VP);
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();

        let before = b.stats();
        let err = b
            .submit_triangle(tex(2), &[0.0; 6], &[0.0; 6], &[0.0; 12])
            .unwrap_err();

        assert_eq!(
            err,
            BatchError::CapacityExceeded { stream: StreamKind::Vertices, requested: 3, available: 0 }
        );
        assert_eq!(b.stats(), before);
        assert_eq!(b.runs(), &[TextureRun { texture: TextureId(1), triangles: 2 }]);
    }

    #[test]
    fn index_overflow_rejects_without_writing() {
        let mut b = SceneBatch::new(3);
        b.reset(VP);
        let (src, dst, colors) = fan_input(6);

        let err = b.submit_triangle_fan(tex(1), &src, &dst, &colors).unwrap_err();
        assert_eq!(
            err,
            BatchError::CapacityExceeded { stream: StreamKind::Indices, requested: 12, available: 10 }
        );
        assert_eq!(b.stats(), BatchStats::default());
    }

    #[test]
    fn reset_restores_capacity() {
        let mut b = SceneBatch::new(2);
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        for _ in 0..3 {
            b.reset(VP);
            b.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();
        }
        assert_eq!(b.vertex_count(), 4);
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn active_transform_applies_to_positions() {
        let mut b = batch();
        b.transform_mut().translate(100.0, 50.0);
        b.submit_triangle(tex(1), &[0.0; 6], &[0.0, 0.0, 100.0, 0.0, 0.0, 50.0], &[0.0; 12])
            .unwrap();

        assert!(approx(b.positions(), &[0.0, 0.0, 1.0, 0.0, 0.0, -1.0]));
    }

    #[test]
    fn command_list_and_affine_agree_on_translate_scale() {
        let mut affine = AffineTransform::identity();
        affine.translate(20.0, 10.0);
        affine.scale(2.0, 2.0);

        let mut commands = TransformCommandList::new();
        commands.scale(2.0, 2.0);
        commands.translate(20.0, 10.0);

        let r = Rect::new(5.0, 5.0, 10.0, 10.0);
        let mut a = batch();
        a.set_transform(affine);
        a.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();

        let mut c = batch();
        c.set_transform(commands);
        c.submit_image(tex(1), r, r, Rgba::WHITE).unwrap();

        assert!(approx(a.positions(), c.positions()));
    }

    #[test]
    fn reset_keeps_transform() {
        let mut b = batch();
        b.transform_mut().translate(3.0, 4.0);
        b.reset(VP);
        assert_ne!(b.transform(), &Transform::default());
    }
}
