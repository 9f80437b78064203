//! Smooth 1-D value noise for pickup drift
//!
//! Returns values in [0, 1] that change slowly as the sample position advances,
//! so a pickup sampling at `offset += 0.01` each frame wanders instead of jittering.

use super::random::Dice;

const TABLE_SIZE: usize = 256;

/// Lattice of random values with smooth interpolation between them
#[derive(Debug, Clone)]
pub struct ValueNoise {
    lattice: [f32; TABLE_SIZE],
}

impl ValueNoise {
    pub fn new(rng: &mut impl Dice) -> Self {
        let mut lattice = [0.0; TABLE_SIZE];
        for v in lattice.iter_mut() {
            *v = rng.unit();
        }
        Self { lattice }
    }

    /// Sample at `x`; wraps every 256 units
    pub fn sample(&self, x: f32) -> f32 {
        let base = x.floor();
        let t = x - base;
        let i = (base as i64).rem_euclid(TABLE_SIZE as i64) as usize;
        let a = self.lattice[i];
        let b = self.lattice[(i + 1) % TABLE_SIZE];
        // Smoothstep fade
        let s = t * t * (3.0 - 2.0 * t);
        a + (b - a) * s
    }
}
