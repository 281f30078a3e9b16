//! Collision testing
//!
//! Bullets are treated as points against axis-aligned entity bounding boxes.
//! Intentionally coarse: no sweeping, so a fast bullet can cross a thin
//! entity between frames. Accepted behavior, not a defect.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Point-in-rect test. Edges and corners count as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.size.x
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}
