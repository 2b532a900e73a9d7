use crate::coords::Viewport;

use super::{to_ndc, PointTransform};

/// One recorded transform operation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransformCommand {
    Translate { dx: f32, dy: f32 },
    Scale { sx: f32, sy: f32 },
    /// Rotation about the origin; sine/cosine are resolved when recorded.
    Rotate { sin: f32, cos: f32 },
}

impl TransformCommand {
    #[inline]
    fn apply(self, x: f32, y: f32) -> (f32, f32) {
        match self {
            TransformCommand::Translate { dx, dy } => (x + dx, y + dy),
            TransformCommand::Scale { sx, sy } => (x * sx, y * sy),
            TransformCommand::Rotate { sin, cos } => (x * cos - y * sin, x * sin + y * cos),
        }
    }
}

/// Ordered, replayable list of transform operations.
///
/// Every point runs through every command in insertion order, so operations
/// may be interleaved freely (unlike [`AffineTransform`](super::AffineTransform)).
/// Application never mutates the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformCommandList {
    commands: Vec<TransformCommand>,
}

impl TransformCommandList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(TransformCommand::Translate { dx, dy });
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(TransformCommand::Scale { sx, sy });
    }

    pub fn rotate(&mut self, angle_degrees: f32) {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        self.commands.push(TransformCommand::Rotate { sin, cos });
    }

    pub fn push(&mut self, command: TransformCommand) {
        self.commands.push(command);
    }

    /// Drops every recorded command.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    #[inline]
    pub fn commands(&self) -> &[TransformCommand] {
        &self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replays every command on one point (surface pixels, before NDC).
    #[inline]
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        self.commands
            .iter()
            .fold((x, y), |(x, y), cmd| cmd.apply(x, y))
    }
}

impl PointTransform for TransformCommandList {
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

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── replay ────────────────────────────────────────────────────────────

    #[test]
    fn empty_list_is_plain_ndc_conversion() {
        let list = TransformCommandList::new();
        assert_eq!(list.apply(&[0.0, 0.0, 400.0, 300.0], VP), vec![-1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn commands_replay_in_insertion_order() {
        let mut translate_first = TransformCommandList::new();
        translate_first.translate(10.0, 0.0);
        translate_first.scale(2.0, 1.0);

        let mut scale_first = TransformCommandList::new();
        scale_first.scale(2.0, 1.0);
        scale_first.translate(10.0, 0.0);

        assert_eq!(translate_first.map_point(1.0, 0.0), (22.0, 0.0));
        assert_eq!(scale_first.map_point(1.0, 0.0), (12.0, 0.0));
    }

    #[test]
    fn rotate_records_sine_and_cosine() {
        let mut list = TransformCommandList::new();
        list.translate(4.0, -2.0);
        list.rotate(90.0);
        match list.commands() {
            [TransformCommand::Translate { dx, dy }, TransformCommand::Rotate { sin, cos }] => {
                assert_eq!((*dx, *dy), (4.0, -2.0));
                assert!(approx(*sin, 1.0) && approx(*cos, 0.0), "sin {sin} cos {cos}");
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn rotate_uses_running_value() {
        let mut list = TransformCommandList::new();
        list.translate(10.0, 0.0);
        list.rotate(90.0);
        let (x, y) = list.map_point(0.0, 0.0);
        assert!(approx(x, 0.0) && approx(y, 10.0), "({x}, {y})");
    }

    #[test]
    fn rotate_about_center_by_interleaving() {
        // Translate to origin, rotate half a turn, translate back.
        let mut list = TransformCommandList::new();
        list.translate(-100.0, -100.0);
        list.rotate(180.0);
        list.translate(100.0, 100.0);
        let (x, y) = list.map_point(110.0, 100.0);
        assert!(approx(x, 90.0) && approx(y, 100.0), "({x}, {y})");
    }

    #[test]
    fn apply_does_not_mutate_list() {
        let mut list = TransformCommandList::new();
        list.translate(1.0, 2.0);
        let before = list.clone();
        let _ = list.apply(&[5.0, 5.0], VP);
        assert_eq!(list, before);
    }

    // ── clone / reset ─────────────────────────────────────────────────────

    #[test]
    fn clone_applies_bit_identically() {
        let mut list = TransformCommandList::new();
        list.translate(3.25, -1.5);
        list.rotate(33.0);
        list.scale(1.7, 0.3);
        let copy = list.clone();

        let pts = [0.1, 0.2, 123.456, 789.0, -5.0, 17.25];
        let a = list.apply(&pts, VP);
        let b = copy.apply(&pts, VP);
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn mutating_clone_leaves_original_untouched() {
        let mut list = TransformCommandList::new();
        list.translate(10.0, 10.0);
        let expected = list.apply(&[1.0, 1.0], VP);

        let mut copy = list.clone();
        copy.scale(4.0, 4.0);
        copy.rotate(45.0);

        assert_eq!(list.len(), 1);
        assert_eq!(list.apply(&[1.0, 1.0], VP), expected);
        assert_ne!(copy.apply(&[1.0, 1.0], VP), expected);
    }

    #[test]
    fn reset_clears_commands() {
        let mut list = TransformCommandList::new();
        list.translate(1.0, 1.0);
        list.rotate(10.0);
        list.reset();
        assert!(list.is_empty());
        assert_eq!(list.map_point(7.0, 8.0), (7.0, 8.0));
    }
}
