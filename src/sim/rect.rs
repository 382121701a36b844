//! Axis-aligned rectangles
//!
//! Every entity in both games is a rectangle: paddles, balls, bricks and the
//! playfield itself. Positions are floats so that Pong's growing ball speed
//! is not truncated each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle stored as top-left corner plus size (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size / 2.0;
    }

    pub fn set_center_x(&mut self, x: f32) {
        self.pos.x = x - self.size.x / 2.0;
    }

    pub fn set_center_y(&mut self, y: f32) {
        self.pos.y = y - self.size.y / 2.0;
    }

    /// True when the interiors intersect (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True when `self` lies entirely inside `bounds` (edges inclusive)
    pub fn is_within(&self, bounds: &Rect) -> bool {
        self.left() >= bounds.left()
            && self.right() <= bounds.right()
            && self.top() >= bounds.top()
            && self.bottom() <= bounds.bottom()
    }

    /// Move the rectangle the least distance needed to fit inside `bounds`.
    /// Assumes `self` is no larger than `bounds`.
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.pos.x = self.pos.x.clamp(bounds.left(), bounds.right() - self.size.x);
        self.pos.y = self.pos.y.clamp(bounds.top(), bounds.bottom() - self.size.y);
    }

    /// Signed offset of `point_y` from the vertical center, in half-heights
    /// (-1 at the top edge, +1 at the bottom edge)
    pub fn offset_y(&self, point_y: f32) -> f32 {
        (point_y - self.center().y) / (self.size.y / 2.0)
    }

    /// Signed offset of `point_x` from the horizontal center, in half-widths
    pub fn offset_x(&self, point_x: f32) -> f32 {
        (point_x - self.center().x) / (self.size.x / 2.0)
    }
}

/// Invert one velocity component
#[inline]
pub fn reflect(component: f32) -> f32 {
    -component
}
