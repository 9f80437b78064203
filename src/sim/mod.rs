//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - The viewport comes in as a parameter, never from globals
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod camera;
pub mod collision;
pub mod geometry;
pub mod noise;
pub mod pickup;
pub mod pool;
pub mod quadtree;
pub mod random;
pub mod ship;
pub mod spawn;
pub mod starfield;
pub mod state;
pub mod tick;
pub mod weapon;

pub use asteroid::{Asteroid, DamageOutcome};
pub use bullet::{Behavior, Bullet};
pub use camera::{Camera, Viewport};
pub use collision::{Body, bodies_collide, circle_circle};
pub use geometry::Rect;
pub use pickup::{Pickup, PickupKind};
pub use pool::RecyclingPool;
pub use quadtree::{IndexedPoint, QuadTree};
pub use ship::Ship;
pub use starfield::Starfield;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, TickResult, tick};
pub use weapon::{ARSENAL, FireResult, Weapon, WeaponKind};
