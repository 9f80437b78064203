//! Power-up pickups dropped by small asteroids
//!
//! Pickups wander on smooth noise rather than velocity, expire after a fixed
//! number of frames, and apply a one-shot effect to the craft on contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::noise::ValueNoise;
use super::random::Dice;
use super::spawn::SpawnCtx;
use super::weapon::{ARSENAL, WeaponKind};
use crate::consts::*;

/// What a pickup does to the craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Shields back to full
    ShieldRefill,
    /// Grant (or refill) a weapon
    Weapon(WeaponKind),
    /// 5% faster turning
    TurnSpeed,
    /// 5% higher top speed
    Thruster,
}

impl PickupKind {
    /// Single-character badge for the HUD
    pub fn badge(&self) -> char {
        match self {
            PickupKind::ShieldRefill => 'S',
            PickupKind::Weapon(_) => 'W',
            PickupKind::TurnSpeed => 'M',
            PickupKind::Thruster => 'T',
        }
    }
}

/// A pickup floating in the world
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Frames left before it vanishes
    pub life: u32,
    /// Current sample positions along the noise curve (x and y drift)
    noise_offset: Vec2,
}

impl Pickup {
    pub fn new(id: u32, kind: PickupKind, pos: Vec2, rng: &mut impl Dice) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: PICKUP_RADIUS,
            life: PICKUP_LIFE_FRAMES,
            noise_offset: Vec2::new(rng.range(0.0, 1000.0), rng.range(0.0, 1000.0)),
        }
    }

    /// Maybe drop a pickup at `pos`. Item odds: shield 40%, weapon 40%,
    /// turn speed 10%, thruster 10%.
    pub fn roll<R: Dice>(pos: Vec2, ctx: &mut SpawnCtx<'_, R>) -> Option<Pickup> {
        if !ctx.rng.chance(ctx.pickup_chance) {
            return None;
        }

        let item = ctx.rng.unit();
        let kind = if item <= 0.4 {
            PickupKind::ShieldRefill
        } else if item <= 0.8 {
            PickupKind::Weapon(ARSENAL[ctx.rng.index(ARSENAL.len())])
        } else if item < 0.9 {
            PickupKind::TurnSpeed
        } else {
            PickupKind::Thruster
        };

        Some(Pickup::new(ctx.ids.allocate(), kind, pos, &mut *ctx.rng))
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Age by one frame and drift along the noise field
    pub fn update(&mut self, noise: &ValueNoise) {
        self.life = self.life.saturating_sub(1);

        self.pos.x += PICKUP_MAX_DRIFT * (noise.sample(self.noise_offset.x) * 2.0 - 1.0);
        self.pos.y += PICKUP_MAX_DRIFT * (noise.sample(self.noise_offset.y) * 2.0 - 1.0);

        self.noise_offset += Vec2::splat(PICKUP_NOISE_STEP);
    }

    /// Mark as used up; returns the effect to apply, or `None` if already expired
    pub fn consume(&mut self) -> Option<PickupKind> {
        if !self.is_alive() {
            return None;
        }
        self.life = 0;
        Some(self.kind)
    }
}

impl Body for Pickup {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}
