//! Axis-aligned rectangles in world units (the museum is 800×600).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A `size`-sized rectangle whose top-left corner sits at `pos`.
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Edges are inclusive, so a pointer on a button's border still hits it.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Strict overlap: rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Clamp the top-left corner of a `size` box so the box stays inside `self`.
    pub fn clamp_inside(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let max_x = (self.right() - size.x).max(self.x);
        let max_y = (self.bottom() - size.y).max(self.y);
        Vec2::new(pos.x.clamp(self.x, max_x), pos.y.clamp(self.y, max_y))
    }
}
