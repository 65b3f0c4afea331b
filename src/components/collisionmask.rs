//! Collision mask component.
//!
//! A [`CollisionMask`] is a positioned polygon outline built from line
//! segments in mask-local coordinates, anchored at the entity's top-left
//! corner. A mask with no segments degrades to bounding-rectangle-only
//! collision, which is what entities without an explicit outline use.
//!
//! Masks are value types during queries: [`CollisionMask::at`] produces a
//! positioned copy, so collision tests never mutate the stored component.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::math::{Rect, Vec2};

/// One polygon edge in mask-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    pub fn translated(&self, offset: Vec2) -> Segment {
        Segment::new(
            self.x1 + offset.x,
            self.y1 + offset.y,
            self.x2 + offset.x,
            self.y2 + offset.y,
        )
    }
}

/// Positioned polygon outline for collision testing.
///
/// Non-empty segment lists form a closed loop once [`CollisionMask::finalize`]
/// has run: the first segment's start point equals the last segment's end
/// point. Incremental [`CollisionMask::add_vertex`] calls do not maintain the
/// invariant on their own.
#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionMask {
    /// World position of the mask's top-left corner.
    pub anchor: Vec2,
    pub width: f64,
    pub height: f64,
    segments: SmallVec<[Segment; 8]>,
}

impl CollisionMask {
    /// A mask with no outline; collision falls back to the bounding rect.
    pub fn aabb_only(width: f64, height: f64) -> Self {
        Self {
            anchor: Vec2::ZERO,
            width,
            height,
            segments: SmallVec::new(),
        }
    }

    /// A rectangular outline covering the inclusive pixel bounds
    /// `[0, width-1] × [0, height-1]`.
    ///
    /// The inclusive bound keeps two `width`-wide masks placed exactly
    /// `width` apart adjacent rather than colliding, while corner-touching
    /// masks still collide.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let mut mask = Self::aabb_only(width, height);
        mask.add_vertex(0.0, 0.0);
        mask.add_vertex(width - 1.0, 0.0);
        mask.add_vertex(width - 1.0, height - 1.0);
        mask.add_vertex(0.0, height - 1.0);
        mask.finalize();
        mask
    }

    /// Append a vertex to the outline under construction.
    ///
    /// The first vertex produces a degenerate placeholder segment that
    /// [`CollisionMask::finalize`] rewrites into the closing edge.
    pub fn add_vertex(&mut self, x: f64, y: f64) {
        match self.segments.last() {
            None => self.segments.push(Segment::new(x, y, x, y)),
            Some(last) => {
                let from = last.end();
                self.segments.push(Segment::new(from.x, from.y, x, y));
            }
        }
    }

    /// Close the outline: the first segment's start point becomes the last
    /// segment's end point.
    pub fn finalize(&mut self) {
        if let Some(&last) = self.segments.last() {
            let first = &mut self.segments[0];
            first.x1 = last.x2;
            first.y1 = last.y2;
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether collision for this mask uses only the bounding rectangle.
    pub fn is_aabb_only(&self) -> bool {
        self.segments.is_empty()
    }

    /// A copy of this mask positioned at `position`.
    pub fn at(&self, position: Vec2) -> Self {
        let mut mask = self.clone();
        mask.anchor = position;
        mask
    }

    /// The outline segments projected into world space.
    pub fn translated_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.segments.iter().map(|s| s.translated(self.anchor))
    }

    /// The broad-phase bounding box in world space.
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(self.anchor.x, self.anchor.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_outline_is_closed() {
        let mask = CollisionMask::rectangle(16.0, 16.0);
        let segments = mask.segments();
        assert_eq!(segments.len(), 4);
        let first = segments[0];
        let last = segments[segments.len() - 1];
        assert_eq!(first.start(), last.end());
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn rectangle_outline_spans_inclusive_bounds() {
        let mask = CollisionMask::rectangle(16.0, 8.0);
        let max_x = mask
            .segments()
            .iter()
            .flat_map(|s| [s.x1, s.x2])
            .fold(f64::MIN, f64::max);
        let max_y = mask
            .segments()
            .iter()
            .flat_map(|s| [s.y1, s.y2])
            .fold(f64::MIN, f64::max);
        assert_eq!(max_x, 15.0);
        assert_eq!(max_y, 7.0);
    }

    #[test]
    fn finalize_closes_arbitrary_loop() {
        let mut mask = CollisionMask::aabb_only(10.0, 10.0);
        mask.add_vertex(0.0, 0.0);
        mask.add_vertex(9.0, 4.0);
        mask.add_vertex(0.0, 9.0);
        mask.finalize();
        let segments = mask.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].start(), segments[2].end());
    }

    #[test]
    fn empty_mask_is_aabb_only() {
        let mask = CollisionMask::aabb_only(4.0, 4.0);
        assert!(mask.is_aabb_only());
        assert_eq!(mask.segments().len(), 0);
    }

    #[test]
    fn at_positions_a_copy() {
        let mask = CollisionMask::rectangle(8.0, 8.0);
        let moved = mask.at(Vec2::new(100.0, 50.0));
        assert_eq!(mask.anchor, Vec2::ZERO);
        assert_eq!(moved.anchor, Vec2::new(100.0, 50.0));
        assert_eq!(moved.segments(), mask.segments());
    }

    #[test]
    fn translated_segments_offset_by_anchor() {
        let mask = CollisionMask::rectangle(8.0, 8.0).at(Vec2::new(10.0, 20.0));
        for (local, world) in mask.segments().iter().zip(mask.translated_segments()) {
            assert_eq!(world.x1, local.x1 + 10.0);
            assert_eq!(world.y1, local.y1 + 20.0);
            assert_eq!(world.x2, local.x2 + 10.0);
            assert_eq!(world.y2, local.y2 + 20.0);
        }
    }

    #[test]
    fn bounding_rect_uses_full_dimensions() {
        let mask = CollisionMask::rectangle(16.0, 8.0).at(Vec2::new(3.0, 4.0));
        let rect = mask.bounding_rect();
        assert_eq!(rect.x, 3.0);
        assert_eq!(rect.y, 4.0);
        assert_eq!(rect.w, 16.0);
        assert_eq!(rect.h, 8.0);
    }
}
