//! Game state and core simulation types
//!
//! Everything a tick reads or mutates lives here. The state owns the live
//! entity collections, the recycling pool and the seeded RNG.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::asteroid::Asteroid;
use super::camera::Viewport;
use super::noise::ValueNoise;
use super::pickup::{Pickup, PickupKind};
use super::pool::RecyclingPool;
use super::random::seeded;
use super::ship::Ship;
use super::spawn::{EntityIds, SpawnCtx};
use super::weapon::WeaponKind;
use crate::consts::ASTEROID_MAX_RADIUS;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Craft destroyed; waiting for the host to restart
    GameOver,
}

/// Lifecycle notifications for rendering, audio and HUD collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// An asteroid's life reached zero
    AsteroidDestroyed { id: u32, radius: f32, pos: Vec2 },
    /// A timed large asteroid entered the field
    AsteroidSpawned { id: u32, radius: f32 },
    /// A destroyed small asteroid dropped a pickup
    PickupSpawned { id: u32, kind: PickupKind, pos: Vec2 },
    /// The craft touched a pickup
    PickupGranted { kind: PickupKind },
    /// A weapon pickup added a weapon or refilled an owned one
    WeaponAcquired { weapon: WeaponKind, refilled: bool },
    /// The craft took damage
    ShipHit { damage: f32, shields: f32 },
    WeaponFired { weapon: WeaponKind },
    /// Trigger pulled on an empty weapon
    FireRejected { weapon: WeaponKind },
    WeaponSwitched { weapon: WeaponKind },
    /// The run ended with this score
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub ship: Ship,
    /// Live asteroids
    pub asteroids: Vec<Asteroid>,
    /// Live pickups
    pub pickups: Vec<Pickup>,
    /// Retired asteroids (only filled when `tuning.recycle_destroyed` is on)
    pub pool: RecyclingPool,
    pub ids: EntityIds,
    /// Drift field shared by all pickups
    pub noise: ValueNoise,
    /// Asteroids destroyed this run
    pub score: u64,
    /// Frames since the last large asteroid spawn
    pub spawn_counter: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh run around the craft at the world origin
    pub fn new(seed: u64, tuning: Tuning, view: &Viewport) -> Self {
        let mut rng = seeded(seed);
        let noise = ValueNoise::new(&mut rng);
        let mut state = Self {
            seed,
            rng,
            ship: Ship::new(tuning.god_mode),
            tuning,
            phase: GamePhase::Playing,
            asteroids: Vec::new(),
            pickups: Vec::new(),
            pool: RecyclingPool::default(),
            ids: EntityIds::default(),
            noise,
            score: 0,
            spawn_counter: 0,
            time_ticks: 0,
        };
        state.restart(view);
        state
    }

    /// New craft, empty field with one large asteroid, score and spawn timer reset.
    /// The RNG, id counter and pool carry over.
    pub fn restart(&mut self, view: &Viewport) {
        self.ship = Ship::new(self.tuning.god_mode);
        self.asteroids.clear();
        self.pickups.clear();
        self.score = 0;
        self.spawn_counter = 0;
        self.phase = GamePhase::Playing;

        let mut ctx = SpawnCtx {
            view: *view,
            ids: &mut self.ids,
            rng: &mut self.rng,
            pickup_chance: self.tuning.pickup_chance,
        };
        self.asteroids = self.pool.get(ASTEROID_MAX_RADIUS, 1, &mut ctx);
        log::info!("New run started (seed {})", self.seed);
    }

    pub fn world_half(&self) -> Vec2 {
        self.tuning.world_half_extents()
    }
}
