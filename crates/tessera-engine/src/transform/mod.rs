//! Point transforms: surface-pixel coordinates → normalized device coordinates.
//!
//! Two strategies implement the same capability ([`PointTransform`]):
//! - [`AffineTransform`]: six composed scalars, fixed composition order, O(n)
//! - [`TransformCommandList`]: replayed operations in any order, O(n · commands)
//!
//! [`Transform`] is the active strategy owned by a batch.

mod affine;
mod commands;

pub use affine::AffineTransform;
pub use commands::{TransformCommand, TransformCommandList};

use crate::coords::Viewport;

/// Maps flat `[x0, y0, x1, y1, ..]` point lists into NDC for a viewport.
pub trait PointTransform {
    /// Writes the mapped points into `out`, which must be as long as `points`.
    fn apply_into(&self, points: &[f32], viewport: Viewport, out: &mut [f32]);

    /// Allocating convenience over [`apply_into`](Self::apply_into).
    fn apply(&self, points: &[f32], viewport: Viewport) -> Vec<f32> {
        let mut out = vec![0.0; points.len()];
        self.apply_into(points, viewport, &mut out);
        out
    }
}

/// Final pixel → NDC step shared by both strategies (Y flipped).
#[inline]
pub(crate) fn to_ndc(x: f32, y: f32, half_w: f32, half_h: f32) -> (f32, f32) {
    (-1.0 + x / half_w, 1.0 - y / half_h)
}

/// The active transform strategy of a rendering context.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Affine(AffineTransform),
    Commands(TransformCommandList),
}

impl Transform {
    pub fn translate(&mut self, x: f32, y: f32) {
        match self {
            Transform::Affine(m) => m.translate(x, y),
            Transform::Commands(c) => c.translate(x, y),
        }
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        match self {
            Transform::Affine(m) => m.scale(x, y),
            Transform::Commands(c) => c.scale(x, y),
        }
    }

    pub fn rotate(&mut self, angle_degrees: f32) {
        match self {
            Transform::Affine(m) => m.rotate(angle_degrees),
            Transform::Commands(c) => c.rotate(angle_degrees),
        }
    }

    /// Back to identity, keeping the current strategy.
    pub fn reset(&mut self) {
        match self {
            Transform::Affine(m) => m.reset(),
            Transform::Commands(c) => c.reset(),
        }
    }

    pub fn as_affine_mut(&mut self) -> Option<&mut AffineTransform> {
        match self {
            Transform::Affine(m) => Some(m),
            Transform::Commands(_) => None,
        }
    }

    pub fn as_commands_mut(&mut self) -> Option<&mut TransformCommandList> {
        match self {
            Transform::Commands(c) => Some(c),
            Transform::Affine(_) => None,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::Affine(AffineTransform::identity())
    }
}

impl From<AffineTransform> for Transform {
    fn from(m: AffineTransform) -> Self {
        Transform::Affine(m)
    }
}

impl From<TransformCommandList> for Transform {
    fn from(c: TransformCommandList) -> Self {
        Transform::Commands(c)
    }
}

impl PointTransform for Transform {
    #[inline]
    fn apply_into(&self, points: &[f32], viewport: Viewport, out: &mut [f32]) {
        match self {
            Transform::Affine(m) => m.apply_into(points, viewport, out),
            Transform::Commands(c) => c.apply_into(points, viewport, out),
        }
    }
}
