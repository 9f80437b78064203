//! Recycling pool for retired asteroids
//!
//! Retired asteroids are binned by size class. Requests for new asteroids of a
//! size drain the matching bin first and only construct the shortfall fresh.
//! Nothing in the pool is alive or referenced by the live list.

use std::collections::HashMap;

use super::asteroid::Asteroid;
use super::random::Dice;
use super::spawn::SpawnCtx;

/// Bin key for a size class
#[inline]
fn size_key(radius: f32) -> u32 {
    radius.round() as u32
}

/// Retired asteroids keyed by radius
#[derive(Debug, Clone, Default)]
pub struct RecyclingPool {
    bins: HashMap<u32, Vec<Asteroid>>,
}

impl RecyclingPool {
    /// Retire an asteroid. The caller must already have removed it from the live list.
    pub fn put(&mut self, mut asteroid: Asteroid) {
        asteroid.alive = false;
        log::trace!("Recycling asteroid {} (radius {})", asteroid.id, asteroid.radius);
        self.bins
            .entry(size_key(asteroid.radius))
            .or_default()
            .push(asteroid);
    }

    /// Up to `count` asteroids of `radius`: reclaimed ones revived on the spawn
    /// ring first, then freshly generated ones for the remainder.
    pub fn get<R: Dice>(
        &mut self,
        radius: f32,
        count: usize,
        ctx: &mut SpawnCtx<'_, R>,
    ) -> Vec<Asteroid> {
        let mut out = Vec::with_capacity(count);

        if let Some(bin) = self.bins.get_mut(&size_key(radius)) {
            let take = count.min(bin.len());
            let start = bin.len() - take;
            for mut asteroid in bin.drain(start..) {
                asteroid.revive(&ctx.view, &mut *ctx.rng);
                out.push(asteroid);
            }
            if take > 0 {
                log::debug!("Reclaimed {} asteroid(s) of radius {}", take, radius);
            }
        }

        let missing = count - out.len();
        if missing > 0 {
            out.extend(Asteroid::generate(missing, radius, ctx));
        }
        out
    }

    /// Total retired asteroids across all bins
    pub fn len(&self) -> usize {
        self.bins.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retired asteroids of one size class
    pub fn bin_len(&self, radius: f32) -> usize {
        self.bins.get(&size_key(radius)).map_or(0, Vec::len)
    }
}
