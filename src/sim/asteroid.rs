//! Destructible asteroids: construction, motion, damage and fragmentation
//!
//! Asteroids come in fixed size classes. Destroying one above the minimum
//! split radius yields exactly two fragments of half the radius, so starting
//! from 128 the sizes run 128, 64, 32, 16, 8 and stop. Destroying a minimum-size
//! asteroid instead rolls for a pickup.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::camera::Viewport;
use super::collision::Body;
use super::pickup::Pickup;
use super::pool::RecyclingPool;
use super::random::Dice;
use super::spawn::{SpawnCtx, spawn_location};
use crate::consts::*;
use crate::{heading, polar_to_cartesian};

/// Rock colors, the last one is ice
pub const ASTEROID_PALETTE: [[u8; 3]; 8] = [
    [78, 59, 35],
    [75, 54, 33],
    [73, 56, 39],
    [73, 50, 33],
    [71, 58, 46],
    [71, 57, 44],
    [70, 63, 56],
    [226, 232, 242],
];

/// A destructible asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Size class
    pub radius: f32,
    /// Remaining durability
    pub life: f32,
    pub alive: bool,
    /// Silhouette vertices, relative to `pos`
    pub verts: Vec<Vec2>,
    pub color: [u8; 3],
}

/// What happened when damage was applied
#[derive(Debug, Default)]
pub struct DamageOutcome {
    /// This call took the asteroid's life to zero
    pub destroyed: bool,
    /// Replacement asteroids for the caller to add to the live list
    pub fragments: Vec<Asteroid>,
    /// Pickup dropped by a minimum-size asteroid
    pub pickup: Option<Pickup>,
}

impl Asteroid {
    /// Build an asteroid heading along `dir` with a jittered silhouette
    pub fn new(id: u32, pos: Vec2, dir: f32, radius: f32, rng: &mut impl Dice) -> Self {
        let speed = ASTEROID_MAX_SPEED / radius + rng.unit();

        // Lower detail for smaller ones
        let n = if radius > 64.0 {
            10
        } else if radius > 16.0 {
            8
        } else {
            6
        };
        let verts = (0..n)
            .map(|i| {
                let angle = i as f32 / n as f32 * std::f32::consts::TAU;
                polar_to_cartesian(radius + rng.range(-0.1 * radius, 0.25 * radius), angle)
            })
            .collect();

        Self {
            id,
            pos,
            vel: polar_to_cartesian(speed, dir),
            radius,
            life: Self::starting_life(radius),
            alive: true,
            verts,
            color: ASTEROID_PALETTE[rng.index(ASTEROID_PALETTE.len())],
        }
    }

    /// Durability a fresh asteroid of this size starts with
    #[inline]
    pub fn starting_life(radius: f32) -> f32 {
        radius / ASTEROID_LIFE_DIVISOR
    }

    /// Create `count` new asteroids on the off-screen spawn ring
    pub fn generate<R: Dice>(
        count: usize,
        radius: f32,
        ctx: &mut SpawnCtx<'_, R>,
    ) -> Vec<Asteroid> {
        (0..count)
            .map(|_| {
                let (pos, dir) = spawn_location(&ctx.view, &mut *ctx.rng);
                Asteroid::new(ctx.ids.allocate(), pos, dir, radius, &mut *ctx.rng)
            })
            .collect()
    }

    /// Bring a retired asteroid back: new spawn point and heading, full life.
    /// Speed and silhouette are kept.
    pub fn revive(&mut self, view: &Viewport, rng: &mut impl Dice) {
        let (pos, dir) = spawn_location(view, rng);
        self.pos = pos;
        self.vel = polar_to_cartesian(self.vel.length(), dir);
        self.alive = true;
        self.life = Self::starting_life(self.radius);
    }

    /// Move by velocity and teleport across the world once past the wrap margin
    pub fn update(&mut self, world_half: Vec2, margin: f32) {
        self.pos += self.vel;
        self.pos.x = wrap_axis(self.pos.x, world_half.x + margin);
        self.pos.y = wrap_axis(self.pos.y, world_half.y + margin);
    }

    /// Reduce life by `amount`. On death, split into two half-size fragments
    /// drawn from `pool`, or roll for a pickup if already minimum size.
    pub fn apply_damage<R: Dice>(
        &mut self,
        amount: f32,
        pool: &mut RecyclingPool,
        ctx: &mut SpawnCtx<'_, R>,
    ) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::default();
        }
        self.life -= amount;
        if self.life > 0.0 {
            return DamageOutcome::default();
        }

        self.alive = false;
        let mut outcome = DamageOutcome {
            destroyed: true,
            ..Default::default()
        };

        if self.radius > ASTEROID_MIN_SPLIT_RADIUS {
            let parent_heading = heading(self.vel);
            let mut fragments = pool.get(self.radius / 2.0, 2, ctx);
            for frag in &mut fragments {
                frag.pos = self.pos;
                let dir = parent_heading + ctx.rng.range(-FRAC_PI_2, FRAC_PI_2);
                // Smaller fragments move faster
                frag.vel = polar_to_cartesian(ASTEROID_MAX_SPEED / frag.radius, dir);
            }
            outcome.fragments = fragments;
        } else {
            outcome.pickup = Pickup::roll(self.pos, ctx);
        }

        outcome
    }
}

impl Body for Asteroid {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Teleport a coordinate that left [-limit, limit] to the opposite edge
#[inline]
fn wrap_axis(v: f32, limit: f32) -> f32 {
    if v < -limit {
        limit
    } else if v > limit {
        -limit
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{FixedDice, seeded};
    use crate::sim::spawn::EntityIds;

    fn view() -> Viewport {
        Viewport::new(Vec2::ZERO, Vec2::new(800.0, 600.0))
    }

    fn still_asteroid(radius: f32) -> Asteroid {
        let mut a = Asteroid::new(1, Vec2::ZERO, 0.0, radius, &mut seeded(1));
        a.vel = Vec2::ZERO;
        a
    }

    #[test]
    fn test_new_asteroid_stats() {
        let mut rng = seeded(5);
        let big = Asteroid::new(1, Vec2::ZERO, 0.0, 128.0, &mut rng);
        assert_eq!(big.life, 8.0);
        assert_eq!(big.verts.len(), 10);
        assert!(big.alive);
        let speed = big.vel.length();
        assert!(speed >= 0.125 && speed < 1.125 + 1e-4);

        assert_eq!(Asteroid::new(2, Vec2::ZERO, 0.0, 64.0, &mut rng).verts.len(), 8);
        assert_eq!(Asteroid::new(3, Vec2::ZERO, 0.0, 16.0, &mut rng).verts.len(), 6);
        assert_eq!(Asteroid::new(4, Vec2::ZERO, 0.0, 8.0, &mut rng).life, 0.5);
    }

    #[test]
    fn test_silhouette_jitter_bounds() {
        let a = Asteroid::new(1, Vec2::ZERO, 0.0, 32.0, &mut seeded(9));
        for v in &a.verts {
            let r = v.length();
            assert!(r >= 32.0 * 0.9 - 1e-3 && r <= 32.0 * 1.25 + 1e-3);
        }
    }

    #[test]
    fn test_world_wrap_teleports() {
        let half = Vec2::new(5000.0, 5000.0);
        let mut a = still_asteroid(32.0);
        a.pos = Vec2::new(5000.0 + 100.0 + 1.0, 20.0);
        a.update(half, 100.0);
        assert!((a.pos.x - (-5100.0)).abs() < 1e-3);
        assert_eq!(a.pos.y, 20.0);

        a.pos = Vec2::new(0.0, -5102.0);
        a.update(half, 100.0);
        assert!((a.pos.y - 5100.0).abs() < 1e-3);

        // Inside the margin nothing happens
        a.pos = Vec2::new(5050.0, 0.0);
        a.update(half, 100.0);
        assert_eq!(a.pos.x, 5050.0);
    }

    #[test]
    fn test_damage_below_threshold_keeps_alive() {
        let mut pool = RecyclingPool::default();
        let mut ids = EntityIds::default();
        let mut rng = seeded(2);
        let mut ctx = SpawnCtx {
            view: view(),
            ids: &mut ids,
            rng: &mut rng,
            pickup_chance: 0.25,
        };
        let mut a = still_asteroid(64.0);
        let outcome = a.apply_damage(1.0, &mut pool, &mut ctx);
        assert!(!outcome.destroyed);
        assert!(a.alive);
        assert_eq!(a.life, 3.0);
        assert!(outcome.fragments.is_empty());
    }

    #[test]
    fn test_split_sequence_halves_to_minimum() {
        let mut pool = RecyclingPool::default();
        let mut ids = EntityIds::default();
        let mut rng = seeded(77);
        let mut ctx = SpawnCtx {
            view: view(),
            ids: &mut ids,
            rng: &mut rng,
            pickup_chance: 0.0,
        };

        let mut generation = vec![still_asteroid(128.0)];
        let mut sizes = Vec::new();
        for _ in 0..6 {
            let mut next = Vec::new();
            for a in &mut generation {
                let life = a.life;
                let outcome = a.apply_damage(life, &mut pool, &mut ctx);
                assert!(outcome.destroyed);
                assert!(!a.alive);
                if a.radius > ASTEROID_MIN_SPLIT_RADIUS {
                    assert_eq!(outcome.fragments.len(), 2);
                } else {
                    assert!(outcome.fragments.is_empty());
                }
                next.extend(outcome.fragments);
            }
            if next.is_empty() {
                break;
            }
            assert!(next.iter().all(|f| f.radius == next[0].radius));
            sizes.push(next[0].radius);
            generation = next;
        }

        assert_eq!(sizes, ASTEROID_SIZE_CLASSES[1..]);
        assert_eq!(generation.len(), 16);
    }

    #[test]
    fn test_fragments_inherit_position_and_speed_rule() {
        let mut pool = RecyclingPool::default();
        let mut ids = EntityIds::default();
        let mut rng = seeded(4);
        let mut ctx = SpawnCtx {
            view: view(),
            ids: &mut ids,
            rng: &mut rng,
            pickup_chance: 0.25,
        };
        let mut a = still_asteroid(32.0);
        a.pos = Vec2::new(400.0, -250.0);
        a.vel = Vec2::new(1.0, 0.0);
        let outcome = a.apply_damage(10.0, &mut pool, &mut ctx);
        for f in &outcome.fragments {
            assert_eq!(f.pos, a.pos);
            assert_eq!(f.radius, 16.0);
            assert!((f.vel.length() - 1.0).abs() < 1e-4);
            // Within ±90° of the parent heading (+x)
            assert!(f.vel.x >= -1e-4);
            assert!(f.alive);
            assert_eq!(f.life, 1.0);
        }
        assert_ne!(outcome.fragments[0].id, outcome.fragments[1].id);
    }

    #[test]
    fn test_min_size_kill_rolls_pickup() {
        let mut pool = RecyclingPool::default();
        let mut ids = EntityIds::default();

        // Forced roll of 0.0 always wins the pickup roll
        let mut lucky = FixedDice(0.0);
        let mut ctx = SpawnCtx {
            view: view(),
            ids: &mut ids,
            rng: &mut lucky,
            pickup_chance: 0.25,
        };
        let mut a = still_asteroid(8.0);
        assert_eq!(a.life, 0.5);
        let outcome = a.apply_damage(1.0, &mut pool, &mut ctx);
        assert!(outcome.destroyed);
        assert!(!a.alive);
        assert!(outcome.fragments.is_empty());
        let pickup = outcome.pickup.expect("roll of 0.0 spawns a pickup");
        assert_eq!(pickup.pos, a.pos);

        // Forced roll of 0.99 never does
        let mut unlucky = FixedDice(0.99);
        let mut ctx = SpawnCtx {
            view: view(),
            ids: &mut ids,
            rng: &mut unlucky,
            pickup_chance: 0.25,
        };
        let mut b = still_asteroid(8.0);
        let outcome = b.apply_damage(1.0, &mut pool, &mut ctx);
        assert!(outcome.destroyed);
        assert!(outcome.fragments.is_empty());
        assert!(outcome.pickup.is_none());
    }

    #[test]
    fn test_dead_asteroid_dies_only_once() {
        let mut pool = RecyclingPool::default();
        let mut ids = EntityIds::default();
        let mut rng = seeded(8);
        let mut ctx = SpawnCtx {
            view: view(),
            ids: &mut ids,
            rng: &mut rng,
            pickup_chance: 0.25,
        };
        let mut a = still_asteroid(16.0);
        assert!(a.apply_damage(5.0, &mut pool, &mut ctx).destroyed);
        let again = a.apply_damage(5.0, &mut pool, &mut ctx);
        assert!(!again.destroyed);
        assert!(again.fragments.is_empty());
    }

    #[test]
    fn test_generate_places_off_screen() {
        let mut ids = EntityIds::default();
        let mut rng = seeded(10);
        let mut ctx = SpawnCtx {
            view: view(),
            ids: &mut ids,
            rng: &mut rng,
            pickup_chance: 0.25,
        };
        let rocks = Asteroid::generate(5, 128.0, &mut ctx);
        assert_eq!(rocks.len(), 5);
        for r in &rocks {
            assert!(!view().rect().contains_point(r.pos));
            assert_eq!(r.radius, 128.0);
            // Drifting toward the screen
            assert!(r.vel.dot(-r.pos) > 0.0);
        }
    }
}
