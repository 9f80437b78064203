//! World tuning knobs
//!
//! Loaded from JSON by the host. Missing keys fall back to [`Tuning::default`],
//! so a document only needs the values it wants to override.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ASTEROID_MAX_RADIUS, BLAST_MAX_RADIUS};
use crate::error::{TuningError, TuningResult};

/// Data-driven simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Half the world width; the craft wraps at ±this
    pub world_half_width: f32,
    /// Half the world height
    pub world_half_height: f32,
    /// Extra distance past the world edge before asteroids wrap
    pub wrap_margin: f32,

    // === Spatial index ===
    /// Minimum margin added around the viewport to form the index region.
    /// The effective margin is [`Tuning::index_reach`].
    pub index_margin: f32,
    /// Points per node before splitting
    pub index_capacity: usize,

    // === Spawning ===
    /// Frames between large asteroid spawns
    pub spawn_interval: u32,
    /// Probability that a destroyed small asteroid drops a pickup
    pub pickup_chance: f32,
    /// Return destroyed asteroids to the recycling pool
    pub recycle_destroyed: bool,

    // === Projectiles ===
    /// Bullets further than this outside the viewport are culled
    pub bullet_cull_margin: f32,

    // === Craft ===
    /// Craft ignores all damage
    pub god_mode: bool,

    // === Camera ===
    /// Distance from the viewport edge at which the camera starts following
    pub camera_edge_buffer: f32,

    // === Starfield ===
    pub star_count: usize,
    pub star_capacity: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_half_width: 5000.0,
            world_half_height: 5000.0,
            wrap_margin: 100.0,

            index_margin: 200.0,
            index_capacity: 5,

            spawn_interval: 180,
            pickup_chance: 0.25,
            recycle_destroyed: false,

            bullet_cull_margin: 200.0,

            god_mode: false,

            camera_edge_buffer: 200.0,

            star_count: 4000,
            star_capacity: 8,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> TuningResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> TuningResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> TuningResult<()> {
        positive("world_half_width", self.world_half_width)?;
        positive("world_half_height", self.world_half_height)?;
        non_negative("wrap_margin", self.wrap_margin)?;
        non_negative("index_margin", self.index_margin)?;
        non_negative("bullet_cull_margin", self.bullet_cull_margin)?;
        non_negative("camera_edge_buffer", self.camera_edge_buffer)?;

        if self.index_capacity == 0 {
            return Err(TuningError::Invalid {
                name: "index_capacity",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        if self.spawn_interval == 0 {
            return Err(TuningError::Invalid {
                name: "spawn_interval",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        if !(0.0..=1.0).contains(&self.pickup_chance) {
            return Err(TuningError::Invalid {
                name: "pickup_chance",
                value: self.pickup_chance as f64,
                expected: "[0.0, 1.0]",
            });
        }
        Ok(())
    }

    /// Margin around the viewport the spatial index must cover. Bullets live
    /// out to the cull margin, so any asteroid a surviving bullet can touch has
    /// its center within cull margin + largest projectile + largest asteroid.
    pub fn index_reach(&self) -> f32 {
        self.index_margin
            .max(self.bullet_cull_margin + BLAST_MAX_RADIUS + ASTEROID_MAX_RADIUS)
    }

    /// World half extents as a vector
    pub fn world_half_extents(&self) -> Vec2 {
        Vec2::new(self.world_half_width, self.world_half_height)
    }
}

fn positive(name: &'static str, value: f32) -> TuningResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            name,
            value: value as f64,
            expected: "(0.0, ∞)",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> TuningResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            name,
            value: value as f64,
            expected: "[0.0, ∞)",
        })
    }
}
