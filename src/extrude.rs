//! CPU model of the screen-space line extrusion.
//!
//! Operates on vertices already projected to NDC. A GPU vertex stage doing the
//! same job must produce the same offsets, or thickness and joins will differ
//! between backends.

use glam::Vec2;

/// Longest miter, as a multiple of half the line thickness.
pub const MITER_LIMIT: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extrusion {
    /// Full line width in NDC units (relative to the viewport height).
    pub thickness: f32,
    /// Viewport width / height.
    pub aspect: f32,
    /// Mitered joins at interior vertices instead of open ones.
    pub miter: bool,
}

impl Extrusion {
    /// NDC offset of one ribbon vertex from its centreline position.
    pub fn offset(&self, current: Vec2, previous: Vec2, next: Vec2, side: f32) -> Vec2 {
        let aspect = Vec2::new(self.aspect, 1.0);
        let current = current * aspect;
        let previous = previous * aspect;
        let next = next * aspect;

        let half = self.thickness / 2.0;
        let to_next = (next - current).normalize_or_zero();
        let from_previous = (current - previous).normalize_or_zero();

        let (normal, length) = if to_next == Vec2::ZERO {
            // open end, or a degenerate point
            (from_previous.perp(), half)
        } else if from_previous == Vec2::ZERO || !self.miter {
            (to_next.perp(), half)
        } else {
            let tangent = (from_previous + to_next).normalize_or_zero();
            if tangent == Vec2::ZERO {
                // the line folds back on itself
                (to_next.perp(), half)
            } else {
                let miter = tangent.perp();
                let cos = miter.dot(from_previous.perp()).max(f32::EPSILON);
                (miter, (half / cos).min(MITER_LIMIT * half))
            }
        };

        let mut offset = normal * length * side;
        offset.x /= self.aspect;
        offset
    }
}
