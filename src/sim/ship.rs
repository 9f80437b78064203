//! The player craft
//!
//! Owns its weapons and the bullets it has fired. Reads a per-tick input
//! snapshot; never touches input devices directly.

use glam::Vec2;

use super::bullet::Bullet;
use super::collision::Body;
use super::pickup::PickupKind;
use super::state::GameEvent;
use super::tick::TickInput;
use super::weapon::{ARSENAL, FireResult, Weapon, WeaponKind};
use crate::consts::*;
use crate::polar_to_cartesian;

/// The player's craft
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians)
    pub dir: f32,
    pub radius: f32,
    /// Durability
    pub shields: f32,
    pub max_shields: f32,
    pub max_speed: f32,
    pub turn_speed: f32,
    /// Frames of post-hit invulnerability left
    pub invulnerable: i32,
    /// Ignores all damage
    pub god: bool,
    pub alive: bool,
    pub weapons: Vec<Weapon>,
    pub weapon_index: usize,
    /// Frames until the weapon can be switched again
    pub weapon_switch_wait: i32,
    /// Live bullets fired by this craft
    pub bullets: Vec<Bullet>,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            dir: 0.0,
            radius: SHIP_RADIUS,
            shields: SHIP_FULL_SHIELD,
            max_shields: SHIP_FULL_SHIELD,
            max_speed: SHIP_MAX_SPEED,
            turn_speed: SHIP_TURN_SPEED,
            invulnerable: 0,
            god: false,
            alive: true,
            weapons: vec![Weapon::new(ARSENAL[0])],
            weapon_index: 0,
            weapon_switch_wait: WEAPON_SWITCH_TIME,
            bullets: Vec::new(),
        }
    }
}

impl Ship {
    pub fn new(god: bool) -> Self {
        Self {
            god,
            ..Default::default()
        }
    }

    /// Temporarily (after a hit) or permanently (god mode) immune to damage
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0 || self.god
    }

    /// Dead for good: shields ran out outside of god mode
    pub fn is_destroyed(&self) -> bool {
        !self.alive && !self.god
    }

    pub fn can_switch_weapon(&self) -> bool {
        self.weapon_switch_wait <= 0
    }

    pub fn current_weapon(&self) -> &Weapon {
        &self.weapons[self.weapon_index]
    }

    /// Fraction of shields left in [0, 1]
    pub fn shields_remaining(&self) -> f32 {
        (self.shields / self.max_shields).max(0.0)
    }

    /// Set shields to `fraction` of the maximum
    pub fn refill_shield(&mut self, fraction: f32) {
        self.shields = fraction * self.max_shields;
    }

    /// Lose `amount` shields unless invulnerable. A hit starts the
    /// invulnerability window. Returns whether damage was taken.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.shields -= amount;
        self.invulnerable = INVULNERABLE_TIME;
        if self.shields <= 0.0 {
            self.alive = false;
        }
        true
    }

    /// Add a weapon, or refill the owned instance of the same kind.
    /// Returns its slot and whether it was a refill.
    pub fn give_weapon(&mut self, kind: WeaponKind) -> (usize, bool) {
        match self.weapons.iter().position(|w| w.kind == kind) {
            Some(i) => {
                self.weapons[i] = Weapon::new(kind);
                (i, true)
            }
            None => {
                self.weapons.push(Weapon::new(kind));
                (self.weapons.len() - 1, false)
            }
        }
    }

    /// Apply a pickup's one-shot effect
    pub fn apply_pickup(&mut self, kind: PickupKind, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::PickupGranted { kind });
        match kind {
            PickupKind::ShieldRefill => self.refill_shield(1.0),
            PickupKind::Weapon(weapon) => {
                let (_, refilled) = self.give_weapon(weapon);
                events.push(GameEvent::WeaponAcquired { weapon, refilled });
            }
            PickupKind::TurnSpeed => self.turn_speed *= 1.05,
            PickupKind::Thruster => self.max_speed *= 1.05,
        }
    }

    /// One frame of timers, controls and motion. Fired bullets are appended
    /// to `self.bullets`.
    pub fn update(&mut self, input: &TickInput, world_half: Vec2, events: &mut Vec<GameEvent>) {
        let index = self.weapon_index;
        self.weapons[index].reduce_reload(1);
        self.weapon_switch_wait -= 1;
        if self.invulnerable > 0 {
            self.invulnerable -= 1;
        }

        let mut thrust = 0.0;
        let mut turn = 0.0;
        if input.thrust {
            thrust += SHIP_THRUST;
        }
        if input.turn_left {
            turn -= self.turn_speed;
        }
        if input.turn_right {
            turn += self.turn_speed;
        }

        if input.fire {
            let (pos, dir) = (self.pos, self.dir);
            let weapon = &mut self.weapons[index];
            match weapon.fire(pos, dir) {
                FireResult::Fired(bullets) => {
                    self.bullets.extend(bullets);
                    events.push(GameEvent::WeaponFired { weapon: weapon.kind });
                }
                FireResult::Rejected => {
                    events.push(GameEvent::FireRejected { weapon: weapon.kind })
                }
                FireResult::NotReady => {}
            }
        }

        if self.can_switch_weapon() && (input.next_weapon || input.prev_weapon) {
            let n = self.weapons.len();
            self.weapon_index = if input.next_weapon {
                (self.weapon_index + 1) % n
            } else {
                (self.weapon_index + n - 1) % n
            };
            self.weapon_switch_wait = WEAPON_SWITCH_TIME;
            events.push(GameEvent::WeaponSwitched {
                weapon: self.current_weapon().kind,
            });
        }

        self.dir += turn;
        self.vel += polar_to_cartesian(thrust, self.dir);
        self.vel = self.vel.clamp_length_max(self.max_speed);
        self.vel *= SHIP_DAMPING;
        self.pos += self.vel;

        if self.pos.x < -world_half.x {
            self.pos.x = world_half.x;
        } else if self.pos.x > world_half.x {
            self.pos.x = -world_half.x;
        }
        if self.pos.y < -world_half.y {
            self.pos.y = world_half.y;
        } else if self.pos.y > world_half.y {
            self.pos.y = -world_half.y;
        }
    }
}

impl Body for Ship {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}
