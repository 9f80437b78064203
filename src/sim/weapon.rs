//! Weapons and the arsenal
//!
//! Every weapon kind is a fixed recipe for the bullets one trigger pull
//! produces. The craft owns weapon instances, each tracking its own reload
//! timer and ammunition.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Behavior, Bullet};

/// Weapon types, in arsenal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Blaster,
    SpeedBlaster,
    TriBeam,
    Bertha,
    Mine,
    OmniBlaster,
    SpaceGrenade,
    DeathBlossom,
}

/// Every weapon a pickup can grant; index 0 is the starting weapon
pub const ARSENAL: [WeaponKind; 8] = [
    WeaponKind::Blaster,
    WeaponKind::SpeedBlaster,
    WeaponKind::TriBeam,
    WeaponKind::Bertha,
    WeaponKind::Mine,
    WeaponKind::OmniBlaster,
    WeaponKind::SpaceGrenade,
    WeaponKind::DeathBlossom,
];

impl WeaponKind {
    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Blaster => "Blaster",
            WeaponKind::SpeedBlaster => "Speed blaster",
            WeaponKind::TriBeam => "Tri-beam",
            WeaponKind::Bertha => "Bertha",
            WeaponKind::Mine => "Mine",
            WeaponKind::OmniBlaster => "Omni-blaster",
            WeaponKind::SpaceGrenade => "Space Grenade",
            WeaponKind::DeathBlossom => "Death Blossom",
        }
    }

    /// Frames between shots
    pub fn reload_time(&self) -> i32 {
        match self {
            WeaponKind::Blaster => 12,
            WeaponKind::SpeedBlaster => 5,
            WeaponKind::TriBeam => 21,
            WeaponKind::Bertha => 30,
            WeaponKind::Mine => 10,
            WeaponKind::OmniBlaster => 40,
            WeaponKind::SpaceGrenade => 60,
            WeaponKind::DeathBlossom => 60,
        }
    }

    /// Shots per pickup (`None` = unlimited)
    pub fn max_ammo(&self) -> Option<u32> {
        match self {
            WeaponKind::Blaster => None,
            WeaponKind::SpeedBlaster => Some(200),
            WeaponKind::TriBeam => Some(60),
            WeaponKind::Bertha => Some(20),
            WeaponKind::Mine => Some(30),
            WeaponKind::OmniBlaster => Some(15),
            WeaponKind::SpaceGrenade => Some(8),
            WeaponKind::DeathBlossom => Some(5),
        }
    }

    /// Bullets produced by one shot from `pos` facing `dir`
    pub fn generate(&self, pos: Vec2, dir: f32) -> Vec<Bullet> {
        match self {
            WeaponKind::Blaster | WeaponKind::SpeedBlaster => vec![Bullet::new(pos, dir, 1.0)],
            WeaponKind::TriBeam => (-1..=1)
                .map(|i| Bullet::new(pos, dir + i as f32 * PI / 8.0, 1.0))
                .collect(),
            WeaponKind::Bertha => {
                let mut b = Bullet::new(pos, dir, 5.0);
                b.radius = 40.0;
                vec![b]
            }
            WeaponKind::Mine => {
                let mut b = Bullet::new(pos, dir, 1.0);
                b.vel = Vec2::ZERO;
                vec![b]
            }
            WeaponKind::OmniBlaster => (0..10)
                .map(|i| Bullet::new(pos, dir + i as f32 * TAU / 10.0, 1.0))
                .collect(),
            WeaponKind::SpaceGrenade => {
                let mut b = Bullet::new(pos, dir, 0.0).with_behavior(Behavior::Grenade);
                b.vel *= 0.5;
                vec![b]
            }
            WeaponKind::DeathBlossom => {
                let mut b =
                    Bullet::new(pos, dir, 1.0).with_behavior(Behavior::Blossom { bursts_left: 2 });
                b.vel *= 2.0;
                b.radius *= 0.5;
                vec![b]
            }
        }
    }
}

/// An owned weapon instance
#[derive(Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    /// Frames until the next shot is allowed (≤ 0 means ready)
    pub reload_remaining: i32,
    /// Shots left (`None` = unlimited)
    pub ammo: Option<u32>,
}

/// Result of pulling the trigger
#[derive(Debug)]
pub enum FireResult {
    Fired(Vec<Bullet>),
    /// Out of ammo; the reload timer restarted to throttle repeat rejections
    Rejected,
    /// Still reloading
    NotReady,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            reload_remaining: 0,
            ammo: kind.max_ammo(),
        }
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo.is_none_or(|n| n > 0)
    }

    pub fn reload_ok(&self) -> bool {
        self.reload_remaining <= 0
    }

    pub fn can_fire(&self) -> bool {
        self.reload_ok() && self.has_ammo()
    }

    /// Fraction of ammo left in [0, 1] (1 for unlimited)
    pub fn ammo_remaining(&self) -> f32 {
        match (self.ammo, self.kind.max_ammo()) {
            (Some(n), Some(max)) if max > 0 => n as f32 / max as f32,
            _ => 1.0,
        }
    }

    pub fn reduce_reload(&mut self, frames: i32) {
        self.reload_remaining -= frames;
    }

    /// Fire if reloaded and loaded; otherwise report why not
    pub fn fire(&mut self, pos: Vec2, dir: f32) -> FireResult {
        if self.can_fire() {
            self.reload_remaining = self.kind.reload_time();
            if let Some(n) = self.ammo.as_mut() {
                *n -= 1;
            }
            FireResult::Fired(self.kind.generate(pos, dir))
        } else if !self.has_ammo() && self.reload_ok() {
            self.reload_remaining = self.kind.reload_time();
            FireResult::Rejected
        } else {
            FireResult::NotReady
        }
    }
}
