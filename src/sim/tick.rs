//! Frame-stepped simulation tick
//!
//! One call advances the game by a single frame in a fixed order:
//! kinematics, index rebuild, bullet and craft collisions, compaction,
//! merging of spawned entities, the large-asteroid timer and the death check.

use serde::Serialize;

use super::asteroid::{Asteroid, DamageOutcome};
use super::bullet::Bullet;
use super::camera::Viewport;
use super::collision::{bodies_collide, query_rect};
use super::pickup::Pickup;
use super::quadtree::{IndexedPoint, QuadTree};
use super::spawn::SpawnCtx;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::ASTEROID_MAX_RADIUS;

/// Input intents held during this tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub next_weapon: bool,
    pub prev_weapon: bool,
}

/// What a tick reports back to the host
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickResult {
    /// Asteroids destroyed this tick
    pub score_delta: u64,
    /// The craft is gone; the host should call [`GameState::restart`]
    pub restart_requested: bool,
    pub events: Vec<GameEvent>,
}

/// Entities produced during collision resolution, merged after compaction
#[derive(Default)]
struct Spawned {
    asteroids: Vec<Asteroid>,
    pickups: Vec<Pickup>,
    bullets: Vec<Bullet>,
}

impl Spawned {
    fn absorb(&mut self, victim: &Asteroid, outcome: DamageOutcome, events: &mut Vec<GameEvent>) {
        if outcome.destroyed {
            events.push(GameEvent::AsteroidDestroyed {
                id: victim.id,
                radius: victim.radius,
                pos: victim.pos,
            });
        }
        if let Some(pickup) = outcome.pickup {
            events.push(GameEvent::PickupSpawned {
                id: pickup.id,
                kind: pickup.kind,
                pos: pickup.pos,
            });
            self.pickups.push(pickup);
        }
        self.asteroids.extend(outcome.fragments);
    }
}

/// Advance the game by one frame. `view` is the camera's current viewport.
pub fn tick(state: &mut GameState, input: &TickInput, view: &Viewport) -> TickResult {
    let mut result = TickResult::default();

    // Nothing moves until the host restarts
    if state.phase == GamePhase::GameOver {
        result.restart_requested = true;
        return result;
    }
    state.time_ticks += 1;

    let world_half = state.world_half();
    let events = &mut result.events;
    let mut spawned = Spawned::default();

    // === Kinematics ===
    state.ship.update(input, world_half, events);

    let cull = view.rect().expand(state.tuning.bullet_cull_margin);
    for bullet in &mut state.ship.bullets {
        spawned.bullets.extend(bullet.update(&cull, &mut state.rng));
    }
    for asteroid in &mut state.asteroids {
        asteroid.update(world_half, state.tuning.wrap_margin);
    }
    for pickup in &mut state.pickups {
        pickup.update(&state.noise);
    }

    // === Spatial index ===
    // Payloads are slots in `state.asteroids`; the list is not reordered until compaction
    let region = view.rect().expand(state.tuning.index_reach());
    let mut tree = QuadTree::new(region, state.tuning.index_capacity, false);
    for (slot, asteroid) in state.asteroids.iter().enumerate() {
        if asteroid.alive {
            tree.insert(IndexedPoint::new(asteroid.pos, slot));
        }
    }

    let mut found = Vec::new();
    let mut collision_tests = 0;

    // === Bullets vs asteroids ===
    {
        let mut ctx = SpawnCtx {
            view: *view,
            ids: &mut state.ids,
            rng: &mut state.rng,
            pickup_chance: state.tuning.pickup_chance,
        };

        for bullet in &mut state.ship.bullets {
            if !bullet.alive {
                continue;
            }
            found.clear();
            tree.query_into(&query_rect(&*bullet, ASTEROID_MAX_RADIUS), &mut found);
            collision_tests += found.len();

            for point in &found {
                let asteroid = &mut state.asteroids[point.data];
                if !(asteroid.alive && bullet.alive) || !bodies_collide(&*bullet, &*asteroid) {
                    continue;
                }
                let outcome = asteroid.apply_damage(bullet.power, &mut state.pool, &mut ctx);
                spawned.absorb(asteroid, outcome, events);
                spawned.bullets.extend(bullet.apply_damage(1.0, &mut *ctx.rng));
            }
        }
    }

    // === Craft vs asteroids ===
    found.clear();
    tree.query_into(&query_rect(&state.ship, ASTEROID_MAX_RADIUS), &mut found);
    collision_tests += found.len();
    for point in &found {
        let asteroid = &state.asteroids[point.data];
        if asteroid.alive && bodies_collide(&state.ship, asteroid) {
            let damage = asteroid.radius;
            if state.ship.apply_damage(damage) {
                events.push(GameEvent::ShipHit {
                    damage,
                    shields: state.ship.shields,
                });
            }
        }
    }

    // === Craft vs pickups ===
    for pickup in &mut state.pickups {
        if pickup.is_alive() && bodies_collide(&state.ship, &*pickup) {
            if let Some(kind) = pickup.consume() {
                state.ship.apply_pickup(kind, events);
            }
        }
    }

    // === Compaction ===
    state.ship.bullets.retain(|b| b.alive);
    state.pickups.retain(Pickup::is_alive);

    let before = state.asteroids.len();
    if state.tuning.recycle_destroyed {
        let (live, dead): (Vec<_>, Vec<_>) =
            std::mem::take(&mut state.asteroids).into_iter().partition(|a| a.alive);
        state.asteroids = live;
        for asteroid in dead {
            state.pool.put(asteroid);
        }
    } else {
        state.asteroids.retain(|a| a.alive);
    }
    let destroyed = (before - state.asteroids.len()) as u64;
    state.score += destroyed;
    result.score_delta = destroyed;

    // === Merge ===
    state.asteroids.append(&mut spawned.asteroids);
    state.pickups.append(&mut spawned.pickups);
    state.ship.bullets.append(&mut spawned.bullets);

    // === Timed large spawn ===
    state.spawn_counter += 1;
    if state.spawn_counter >= state.tuning.spawn_interval {
        state.spawn_counter = 0;
        let mut ctx = SpawnCtx {
            view: *view,
            ids: &mut state.ids,
            rng: &mut state.rng,
            pickup_chance: state.tuning.pickup_chance,
        };
        for asteroid in state.pool.get(ASTEROID_MAX_RADIUS, 1, &mut ctx) {
            log::debug!("Spawned large asteroid {} at {}", asteroid.id, asteroid.pos);
            events.push(GameEvent::AsteroidSpawned {
                id: asteroid.id,
                radius: asteroid.radius,
            });
            state.asteroids.push(asteroid);
        }
    }

    log::trace!(
        "tick {}: {} asteroids, {} bullets, {} collision candidates",
        state.time_ticks,
        state.asteroids.len(),
        state.ship.bullets.len(),
        collision_tests
    );

    // === Death check ===
    if state.ship.is_destroyed() {
        state.phase = GamePhase::GameOver;
        result.restart_requested = true;
        result.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over: score {} after {} ticks",
            state.score,
            state.time_ticks
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::BULLET_RADIUS;
    use crate::sim::pickup::PickupKind;
    use crate::sim::weapon::WeaponKind;
    use crate::tuning::Tuning;

    fn view() -> Viewport {
        Viewport::new(Vec2::ZERO, Vec2::new(800.0, 600.0))
    }

    /// Empty field with no random pickup drops
    fn quiet_state(tuning: Tuning) -> GameState {
        let mut state = GameState::new(
            3,
            Tuning {
                pickup_chance: 0.0,
                ..tuning
            },
            &view(),
        );
        state.asteroids.clear();
        state
    }

    fn parked_asteroid(state: &mut GameState, pos: Vec2, radius: f32) -> u32 {
        let id = state.ids.allocate();
        let mut a = Asteroid::new(id, pos, 0.0, radius, &mut state.rng);
        a.vel = Vec2::ZERO;
        state.asteroids.push(a);
        id
    }

    fn mine(pos: Vec2) -> Bullet {
        let mut b = Bullet::new(pos, 0.0, 1.0);
        b.vel = Vec2::ZERO;
        b
    }

    #[test]
    fn test_bullet_kills_minimum_size_asteroid() {
        let mut state = quiet_state(Tuning::default());
        let id = parked_asteroid(&mut state, Vec2::new(20.0, 0.0), 8.0);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let result = tick(&mut state, &fire, &view());

        assert_eq!(result.score_delta, 1);
        assert_eq!(state.score, 1);
        assert!(state.asteroids.is_empty());
        assert!(state.ship.bullets.is_empty());
        assert!(result.events.contains(&GameEvent::AsteroidDestroyed {
            id,
            radius: 8.0,
            pos: Vec2::new(20.0, 0.0)
        }));
        assert!(!result.restart_requested);
    }

    #[test]
    fn test_destroyed_asteroid_splits_into_live_list() {
        let mut state = quiet_state(Tuning::default());
        parked_asteroid(&mut state, Vec2::new(100.0, 0.0), 16.0);
        state.ship.bullets.push(mine(Vec2::new(100.0, 0.0)));

        let result = tick(&mut state, &TickInput::default(), &view());
        assert_eq!(result.score_delta, 1);
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.radius == 8.0 && a.alive));
        assert!(state.pool.is_empty());
    }

    #[test]
    fn test_asteroid_dies_once_per_tick() {
        let mut state = quiet_state(Tuning::default());
        parked_asteroid(&mut state, Vec2::new(100.0, 0.0), 8.0);
        state.ship.bullets.push(mine(Vec2::new(100.0, 0.0)));
        state.ship.bullets.push(mine(Vec2::new(101.0, 0.0)));

        let result = tick(&mut state, &TickInput::default(), &view());
        assert_eq!(result.score_delta, 1);
        // The second bullet found the asteroid already dead
        assert_eq!(state.ship.bullets.len(), 1);
        assert_eq!(
            result
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::AsteroidDestroyed { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_touching_largest_asteroid_counts_on_every_side() {
        let bullet_pos = Vec2::new(300.0, 200.0);
        let reach = BULLET_RADIUS + ASTEROID_MAX_RADIUS;
        for offset in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
            let mut state = quiet_state(Tuning::default());
            parked_asteroid(&mut state, bullet_pos + offset * reach, ASTEROID_MAX_RADIUS);
            state.asteroids[0].life = 0.5;
            state.ship.bullets.push(mine(bullet_pos));

            let result = tick(&mut state, &TickInput::default(), &view());
            assert_eq!(result.score_delta, 1, "no hit with target along {}", offset);
        }
    }

    #[test]
    fn test_bullet_in_cull_band_hits_asteroid_past_view_margin() {
        let mut state = quiet_state(Tuning::default());
        // Cull bound reaches x = 600; the asteroid center sits beyond it
        parked_asteroid(&mut state, Vec2::new(680.0, 0.0), ASTEROID_MAX_RADIUS);
        state.asteroids[0].life = 0.5;
        state.ship.bullets.push(mine(Vec2::new(580.0, 0.0)));

        let result = tick(&mut state, &TickInput::default(), &view());
        assert_eq!(result.score_delta, 1);
        assert!(state.ship.bullets.is_empty());
    }

    #[test]
    fn test_recycling_is_opt_in() {
        let mut state = quiet_state(Tuning {
            recycle_destroyed: true,
            ..Default::default()
        });
        parked_asteroid(&mut state, Vec2::new(100.0, 0.0), 16.0);
        state.ship.bullets.push(mine(Vec2::new(100.0, 0.0)));
        tick(&mut state, &TickInput::default(), &view());

        assert_eq!(state.pool.bin_len(16.0), 1);
        assert!(state.asteroids.iter().all(|a| a.alive));
    }

    #[test]
    fn test_bullets_culled_outside_view() {
        let mut state = quiet_state(Tuning::default());
        let mut b = Bullet::new(Vec2::new(595.0, 0.0), 0.0, 1.0);
        b.vel = Vec2::new(10.0, 0.0);
        state.ship.bullets.push(b);
        tick(&mut state, &TickInput::default(), &view());
        assert!(state.ship.bullets.is_empty());
    }

    #[test]
    fn test_grenade_hit_leaves_blast() {
        let mut state = quiet_state(Tuning::default());
        parked_asteroid(&mut state, Vec2::new(100.0, 0.0), 64.0);
        let mut grenade = WeaponKind::SpaceGrenade.generate(Vec2::new(100.0, 0.0), 0.0).remove(0);
        grenade.vel = Vec2::ZERO;
        state.ship.bullets.push(grenade);

        tick(&mut state, &TickInput::default(), &view());
        // Power 0 leaves the asteroid intact; the grenade became a blast
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.ship.bullets.len(), 1);
        assert!(matches!(
            state.ship.bullets[0].behavior,
            crate::sim::bullet::Behavior::Blast { .. }
        ));
    }

    #[test]
    fn test_pickup_collected_on_contact() {
        let mut state = quiet_state(Tuning::default());
        state.ship.shields = 20.0;
        let id = state.ids.allocate();
        let pos = Vec2::new(10.0, 0.0);
        let pickup = Pickup::new(id, PickupKind::ShieldRefill, pos, &mut state.rng);
        state.pickups.push(pickup);

        let result = tick(&mut state, &TickInput::default(), &view());
        assert!(state.pickups.is_empty());
        assert_eq!(state.ship.shields, state.ship.max_shields);
        assert!(result.events.contains(&GameEvent::PickupGranted {
            kind: PickupKind::ShieldRefill
        }));
    }

    #[test]
    fn test_timed_large_spawn() {
        let mut state = quiet_state(Tuning {
            spawn_interval: 3,
            ..Default::default()
        });
        for _ in 0..2 {
            tick(&mut state, &TickInput::default(), &view());
        }
        assert!(state.asteroids.is_empty());

        let result = tick(&mut state, &TickInput::default(), &view());
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].radius, ASTEROID_MAX_RADIUS);
        assert_eq!(state.spawn_counter, 0);
        assert!(
            result
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::AsteroidSpawned { radius, .. } if *radius == 128.0))
        );
    }

    #[test]
    fn test_craft_destroyed_requests_restart() {
        let mut state = quiet_state(Tuning::default());
        state.ship.shields = 10.0;
        parked_asteroid(&mut state, Vec2::ZERO, 32.0);
        state.score = 5;

        let result = tick(&mut state, &TickInput::default(), &view());
        assert!(result.restart_requested);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(result.events.contains(&GameEvent::GameOver { score: 5 }));

        // Frozen until restarted
        let ticks = state.time_ticks;
        let again = tick(&mut state, &TickInput::default(), &view());
        assert!(again.restart_requested);
        assert_eq!(state.time_ticks, ticks);

        state.restart(&view());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!tick(&mut state, &TickInput::default(), &view()).restart_requested);
    }

    #[test]
    fn test_god_mode_survives_collision() {
        let mut state = quiet_state(Tuning {
            god_mode: true,
            ..Default::default()
        });
        parked_asteroid(&mut state, Vec2::ZERO, 128.0);
        let result = tick(&mut state, &TickInput::default(), &view());
        assert!(!result.restart_requested);
        assert_eq!(state.ship.shields, state.ship.max_shields);
    }

    #[test]
    fn test_same_seed_same_run() {
        let script = |frame: u64| TickInput {
            thrust: frame % 90 < 40,
            turn_left: frame % 200 < 30,
            fire: frame % 3 == 0,
            ..Default::default()
        };

        let run = || {
            let mut state = GameState::new(42, Tuning::default(), &view());
            for frame in 0..600 {
                if tick(&mut state, &script(frame), &view()).restart_requested {
                    state.restart(&view());
                }
            }
            state
        };

        let (a, b) = (run(), run());
        assert_eq!(a.score, b.score);
        assert_eq!(a.ship.pos, b.ship.pos);
        let positions = |s: &GameState| s.asteroids.iter().map(|a| a.pos).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }
}
