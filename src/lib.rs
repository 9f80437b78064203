//! Roidfield - A wrapping asteroid-field arena simulation
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (spatial index, collisions, entity lifecycle)
//! - `tuning`: Data-driven world configuration
//! - `error`: Configuration errors

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{TuningError, TuningResult};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest asteroid size class (pixels)
    pub const ASTEROID_MAX_RADIUS: f32 = 128.0;
    /// Asteroids at or below this radius no longer split
    pub const ASTEROID_MIN_SPLIT_RADIUS: f32 = 8.0;
    /// Speed numerator: asteroid speed is this divided by radius (pixels/frame)
    pub const ASTEROID_MAX_SPEED: f32 = 16.0;
    /// Durability per pixel of radius is 1/16
    pub const ASTEROID_LIFE_DIVISOR: f32 = 16.0;
    /// Every size class an asteroid can have, largest first
    pub const ASTEROID_SIZE_CLASSES: [f32; 5] = [128.0, 64.0, 32.0, 16.0, 8.0];

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 3.0;
    /// Grenade blasts grow to a random radius in this range (the largest projectiles)
    pub const BLAST_MIN_RADIUS: f32 = 100.0;
    pub const BLAST_MAX_RADIUS: f32 = 150.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 6.0;
    pub const SHIP_MAX_SPEED: f32 = 3.0;
    pub const SHIP_THRUST: f32 = 0.1;
    pub const SHIP_TURN_SPEED: f32 = 0.05; // about PI/60 radians/frame
    pub const SHIP_DAMPING: f32 = 0.995;
    pub const SHIP_FULL_SHIELD: f32 = 100.0;
    /// Frames between weapon switches
    pub const WEAPON_SWITCH_TIME: i32 = 30;
    /// Frames of invulnerability after being hit
    pub const INVULNERABLE_TIME: i32 = 100;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 25.0;
    pub const PICKUP_LIFE_FRAMES: u32 = 60 * 8;
    pub const PICKUP_MAX_DRIFT: f32 = 3.0;
    pub const PICKUP_NOISE_STEP: f32 = 0.01;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle of a vector (radians, atan2 convention)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
