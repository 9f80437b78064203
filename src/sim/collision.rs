//! Narrow-phase tests between circular bodies
//!
//! Everything that collides (craft, bullets, asteroids, pickups) is treated as
//! a circle. The broad phase is the quad-tree query; these run on its results.

use glam::Vec2;

use super::geometry::Rect;

/// Extra padding on broad-phase rects. Point containment is half-open, so a
/// target touching on the high side would otherwise sit exactly on the excluded edge.
pub const BROAD_PHASE_SLACK: f32 = 1.0;

/// Anything with a position and a collision radius
pub trait Body {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Circles overlap or touch. Compares squared distances (no square root).
#[inline]
pub fn circle_circle(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= reach * reach
}

/// Circle test between two bodies
#[inline]
pub fn bodies_collide(a: &impl Body, b: &impl Body) -> bool {
    circle_circle(a.pos(), a.radius(), b.pos(), b.radius())
}

/// Broad-phase query rect for `body` against targets no larger than `max_other_radius`.
/// Every target center that can touch `body` lies strictly inside it.
pub fn query_rect(body: &impl Body, max_other_radius: f32) -> Rect {
    Rect::around(
        body.pos(),
        body.radius() + max_other_radius + BROAD_PHASE_SLACK,
    )
}
