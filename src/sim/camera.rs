//! Viewport and follow camera
//!
//! The viewport is supplied to every tick by the host; it sizes the spatial
//! index region, the projectile cull bound, and the off-screen spawn ring.

use glam::Vec2;

use super::geometry::Rect;

/// The visible part of the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World position at the middle of the screen
    pub center: Vec2,
    /// Half the screen size in world units
    pub half_size: Vec2,
}

impl Viewport {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_size: size * 0.5,
        }
    }

    /// Visible rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.half_size)
    }

    /// Distance from the center to a screen corner
    pub fn half_diagonal(&self) -> f32 {
        self.half_size.length()
    }
}

/// Camera that keeps a target inside the screen minus an edge buffer
#[derive(Debug, Clone)]
pub struct Camera {
    pub center: Vec2,
    pub edge_buffer: f32,
}

impl Camera {
    pub fn new(edge_buffer: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            edge_buffer,
        }
    }

    /// Move just enough to keep `target` within the inner box, then clamp so
    /// the screen never shows past the world edge.
    pub fn follow(&mut self, target: Vec2, screen: Vec2, world_half: Vec2) -> Viewport {
        let inner = (screen * 0.5 - Vec2::splat(self.edge_buffer)).max(Vec2::ZERO);

        let lo = self.center - inner;
        let hi = self.center + inner;
        self.center += target.max(hi) - hi;
        self.center += target.min(lo) - lo;

        let limit = (world_half - screen * 0.5).max(Vec2::ZERO);
        self.center = self.center.clamp(-limit, limit);

        Viewport::new(self.center, screen)
    }
}
