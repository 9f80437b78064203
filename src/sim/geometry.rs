//! Axis-aligned rectangle for region queries
//!
//! A rect is defined by its low corner (x1, y1) and high corner (x2, y2).
//! Point containment is half-open so that adjacent rects never share a point;
//! rect intersection is closed so that range queries never miss a boundary.

use glam::Vec2;

/// An axis-aligned rectangle with `x1 <= x2` and `y1 <= y2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2, "rect corners swapped");
        Self { x1, y1, x2, y2 }
    }

    /// Rect centered on `center`, extending `half` in each direction
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    /// Square of side `2 * half` centered on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::from_center(center, Vec2::splat(half))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x1 + 0.5 * self.width(),
            self.y1 + 0.5 * self.height(),
        )
    }

    /// Low corner inclusive, high corner exclusive
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.x1 <= p.x && p.x < self.x2 && self.y1 <= p.y && p.y < self.y2
    }

    /// True if `other` lies completely inside this rect
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    /// Closed-interval overlap test (touching edges count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x1 > other.x2 || self.x2 < other.x1) && !(self.y1 > other.y2 || self.y2 < other.y1)
    }

    /// Grow the rect by `margin` on every side
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.x1 - margin,
            self.y1 - margin,
            self.x2 + margin,
            self.y2 + margin,
        )
    }

    /// Split into four equal quadrants: (low, low), (high, low), (low, high), (high, high)
    pub fn quadrants(&self) -> [Rect; 4] {
        let mx = self.x1 + self.width() / 2.0;
        let my = self.y1 + self.height() / 2.0;
        [
            Rect::new(self.x1, self.y1, mx, my),
            Rect::new(mx, self.y1, self.x2, my),
            Rect::new(self.x1, my, mx, self.y2),
            Rect::new(mx, my, self.x2, self.y2),
        ]
    }
}
