//! Projectiles and their staged behaviors
//!
//! Multi-stage weapons are expressed as a closed set of behaviors instead of
//! per-bullet callbacks: each variant has an update step and a death step, and
//! the death step returns whatever the bullet turns into.

use std::f32::consts::TAU;

use glam::Vec2;

use super::collision::Body;
use super::geometry::Rect;
use super::random::Dice;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Frames a grenade blast lingers
pub const BLAST_DURATION: u32 = 60 * 2;
/// Blast durability; it wears down one point per asteroid hit
pub const BLAST_LIFE: f32 = 1000.0;
/// Sub-projectiles per death blossom burst
pub const BLOSSOM_PETALS: usize = 16;

/// How a bullet behaves while flying and when it dies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Flies straight, nothing on death
    Plain,
    /// Detonates into a blast on death
    Grenade,
    /// Stationary, grows toward `max_radius`, expires after `time_left` frames
    Blast { time_left: u32, max_radius: f32 },
    /// Bursts into a ring of petals on death; petals burst again while `bursts_left > 1`
    Blossom { bursts_left: u8 },
}

/// A projectile fired by the craft (or spawned by another projectile)
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Damage dealt per hit
    pub power: f32,
    /// Hits it can take before dying
    pub life: f32,
    pub alive: bool,
    pub behavior: Behavior,
}

impl Bullet {
    pub fn new(pos: Vec2, dir: f32, power: f32) -> Self {
        Self {
            pos,
            vel: polar_to_cartesian(BULLET_SPEED, dir),
            radius: BULLET_RADIUS,
            power,
            life: 1.0,
            alive: true,
            behavior: Behavior::Plain,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Move, run the behavior's per-frame step, and cull if outside `bounds`.
    /// Returns anything spawned by a behavior-triggered death.
    pub fn update(&mut self, bounds: &Rect, rng: &mut impl Dice) -> Vec<Bullet> {
        self.pos += self.vel;

        // Leaving the play area is not a death: no on-death behavior runs
        if !bounds.contains_point(self.pos) {
            self.alive = false;
            return Vec::new();
        }

        if let Behavior::Blast {
            ref mut time_left,
            max_radius,
        } = self.behavior
        {
            if self.radius < max_radius {
                self.radius += 1.0;
            }
            *time_left = time_left.saturating_sub(1);
            if *time_left == 0 {
                let remaining = self.life;
                return self.apply_damage(remaining, rng);
            }
        }
        Vec::new()
    }

    /// Take `amount` hits. Dying runs the on-death behavior, whose spawn is returned.
    pub fn apply_damage(&mut self, amount: f32, rng: &mut impl Dice) -> Vec<Bullet> {
        if !self.alive {
            return Vec::new();
        }
        self.life -= amount;
        if self.life > 0.0 {
            return Vec::new();
        }
        self.alive = false;
        self.on_death(rng)
    }

    fn on_death(&self, rng: &mut impl Dice) -> Vec<Bullet> {
        match self.behavior {
            Behavior::Plain | Behavior::Blast { .. } => Vec::new(),
            Behavior::Grenade => {
                let mut blast = Bullet::new(self.pos, 0.0, 1.0).with_behavior(Behavior::Blast {
                    time_left: BLAST_DURATION,
                    max_radius: rng.range(BLAST_MIN_RADIUS, BLAST_MAX_RADIUS),
                });
                blast.vel = Vec2::ZERO;
                blast.life = BLAST_LIFE;
                vec![blast]
            }
            Behavior::Blossom { bursts_left } => (0..BLOSSOM_PETALS)
                .map(|i| {
                    let dir = i as f32 * TAU / BLOSSOM_PETALS as f32;
                    let mut petal = Bullet::new(self.pos, dir, 1.0);
                    if bursts_left > 1 {
                        petal.pos += petal.vel;
                        petal.vel *= 0.75;
                        petal.behavior = Behavior::Blossom {
                            bursts_left: bursts_left - 1,
                        };
                    } else {
                        petal.vel *= 1.2;
                        petal.pos += petal.vel;
                        petal.radius *= 2.0;
                    }
                    petal
                })
                .collect(),
        }
    }
}

impl Body for Bullet {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}
