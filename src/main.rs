//! Roidfield headless driver
//!
//! Runs a scripted session against the simulation and logs what happened.
//! Usage: `roidfield [tuning.json] [seed]`. Set `RUST_LOG=debug` for spawn and
//! pool traffic, `RUST_LOG=trace` for per-tick collision counts.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Roidfield (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = args.next().map_or_else(roidfield::Tuning::default, |path| load_tuning(&path));
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    driver::run(tuning, seed, 5000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> roidfield::Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| roidfield::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            roidfield::Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod driver {
    use glam::Vec2;
    use roidfield::sim::random::seeded;
    use roidfield::sim::{Camera, GameEvent, GameState, Starfield, TickInput, Viewport, tick};
    use roidfield::{Tuning, heading, normalize_angle};

    /// Screen size the session pretends to render at
    const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

    #[derive(Debug, Default)]
    struct Summary {
        runs: u32,
        best_score: u64,
        destroyed: u64,
        pickups: u32,
        hits: u32,
        rejected_shots: u32,
    }

    /// Aim at the closest asteroid, fire when roughly lined up, drift forward
    /// now and then, and cycle weapons every few seconds
    fn autopilot(state: &GameState, frame: u64) -> TickInput {
        let ship = &state.ship;
        let target = state
            .asteroids
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ship.pos)
                    .total_cmp(&b.pos.distance_squared(ship.pos))
            })
            .map(|a| a.pos);

        let mut input = TickInput {
            thrust: frame % 240 < 60,
            next_weapon: frame % 600 == 0,
            ..Default::default()
        };
        if let Some(target) = target {
            let off = normalize_angle(heading(target - ship.pos) - ship.dir);
            input.turn_left = off < -0.05;
            input.turn_right = off > 0.05;
            input.fire = off.abs() < 0.3;
        }
        input
    }

    pub fn run(tuning: Tuning, seed: u64, frames: u64) {
        let world_half = tuning.world_half_extents();
        let stars = Starfield::new(
            tuning.star_count,
            tuning.star_capacity,
            world_half,
            &mut seeded(seed ^ 0x5eed),
        );
        let mut camera = Camera::new(tuning.camera_edge_buffer);
        let mut view = Viewport::new(Vec2::ZERO, SCREEN);
        let mut state = GameState::new(seed, tuning, &view);
        let mut summary = Summary::default();

        for frame in 0..frames {
            let input = autopilot(&state, frame);
            let result = tick(&mut state, &input, &view);

            for event in &result.events {
                match event {
                    GameEvent::PickupGranted { kind } => {
                        summary.pickups += 1;
                        log::debug!("Picked up [{}]", kind.badge());
                    }
                    GameEvent::ShipHit { damage, .. } => {
                        summary.hits += 1;
                        log::debug!(
                            "Hit for {}, shields at {:.0}%",
                            damage,
                            100.0 * state.ship.shields_remaining()
                        );
                    }
                    GameEvent::FireRejected { .. } => summary.rejected_shots += 1,
                    GameEvent::WeaponAcquired { weapon, refilled } => {
                        let verb = if *refilled { "Refilled" } else { "Got" };
                        log::debug!("{} {}", verb, weapon.name());
                    }
                    GameEvent::WeaponSwitched { weapon } => {
                        log::debug!(
                            "Switched to {} ({:.0}% ammo)",
                            weapon.name(),
                            100.0 * state.ship.current_weapon().ammo_remaining()
                        );
                    }
                    _ => {}
                }
            }
            summary.destroyed += result.score_delta;

            if result.restart_requested {
                summary.runs += 1;
                summary.best_score = summary.best_score.max(state.score);
                camera = Camera::new(state.tuning.camera_edge_buffer);
                view = Viewport::new(Vec2::ZERO, SCREEN);
                state.restart(&view);
                continue;
            }

            view = camera.follow(state.ship.pos, SCREEN, world_half);
            if frame % 600 == 0 {
                log::debug!(
                    "frame {}: {} asteroids, {} stars on screen, {} pooled",
                    frame,
                    state.asteroids.len(),
                    stars.visible(&view).len(),
                    state.pool.len()
                );
            }
        }

        summary.best_score = summary.best_score.max(state.score);
        log::info!(
            "Session over after {} frames: {} finished runs, best score {}, current score {}",
            frames,
            summary.runs,
            summary.best_score,
            state.score
        );
        log::info!(
            "{} asteroids destroyed, {} pickups, {} hits taken, {} empty trigger pulls",
            summary.destroyed,
            summary.pickups,
            summary.hits,
            summary.rejected_shots
        );
    }
}
