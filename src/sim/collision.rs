//! Axis-aligned collision tests

use glam::Vec2;

/// Inclusive AABB overlap: boxes whose edges touch count as colliding.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn boxes_overlap(
    ax: f32,
    ay: f32,
    aw: f32,
    ah: f32,
    bx: f32,
    by: f32,
    bw: f32,
    bh: f32,
) -> bool {
    ax + aw >= bx && ax <= bx + bw && ay + ah >= by && ay <= by + bh
}

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        boxes_overlap(
            self.min.x,
            self.min.y,
            self.size.x,
            self.size.y,
            other.min.x,
            other.min.y,
            other.size.x,
            other.size.y,
        )
    }
}
