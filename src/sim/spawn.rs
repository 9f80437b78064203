//! Spawn placement and entity id allocation
//!
//! New asteroids appear on a ring just outside the visible area, heading back
//! toward the screen center so they drift into view.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::camera::Viewport;
use super::random::Dice;
use crate::{heading, polar_to_cartesian};

/// How far past the screen corner the spawn ring sits (multiplier on the half diagonal)
pub const SPAWN_RING_SCALE: f32 = 1.1;
/// Maximum deviation of the initial heading from "straight at the center"
pub const SPAWN_HEADING_SPREAD: f32 = PI / 6.0;

/// Monotonic entity id source
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// What spawning code needs from the running game
pub struct SpawnCtx<'a, R: Dice> {
    pub view: Viewport,
    pub ids: &'a mut EntityIds,
    pub rng: &'a mut R,
    /// Probability that a destroyed small asteroid drops a pickup
    pub pickup_chance: f32,
}

/// Pick an off-screen spawn point and a heading aimed roughly back at the center
pub fn spawn_location(view: &Viewport, rng: &mut impl Dice) -> (Vec2, f32) {
    let offset = polar_to_cartesian(view.half_diagonal(), rng.range(0.0, TAU));
    let reverse_heading =
        heading(offset) + PI + rng.range(-SPAWN_HEADING_SPREAD, SPAWN_HEADING_SPREAD);
    (offset * SPAWN_RING_SCALE + view.center, reverse_heading)
}
