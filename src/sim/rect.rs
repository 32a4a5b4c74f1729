//! Axis-aligned rectangles in world space
//!
//! World coordinates have the origin at the top-left, y growing downward.
//! Overlap is strict: rectangles that only share an edge do not intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centred on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    /// Grow by `pad` on every side
    pub fn padded(&self, pad: f32) -> Self {
        Self::new(self.x - pad, self.y - pad, self.w + 2.0 * pad, self.h + 2.0 * pad)
    }

    /// Same top-left corner, width and height swapped
    pub fn rotated(&self) -> Self {
        Self::new(self.x, self.y, self.h, self.w)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether the rectangle lies fully inside `[0, bounds]`
    pub fn within(&self, bounds: Vec2) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= bounds.x && self.bottom() <= bounds.y
    }
}
