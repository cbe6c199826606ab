//! Axis-aligned bounding-box overlap testing
//!
//! The one collision primitive every entity pair shares. Overlap must have
//! non-zero area: boxes that merely share an edge or corner do not collide.

use glam::Vec2;

/// An axis-aligned bounding box in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box with its top-left corner at `pos` extending by `size`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// True iff the boxes overlap with non-zero area. Symmetric; strict
    /// inequalities, so edge or corner contact is not an overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
