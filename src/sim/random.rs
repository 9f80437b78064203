//! Random source used by spawning and pickup rolls
//!
//! Simulation code takes `&mut impl Dice` rather than a concrete generator so
//! tests can force individual rolls.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform random numbers
pub trait Dice {
    /// Uniform float in [0, 1)
    fn unit(&mut self) -> f32;

    /// Uniform float in [lo, hi)
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform index in [0, n). `n` must be non-zero.
    fn index(&mut self, n: usize) -> usize {
        ((self.unit() * n as f32) as usize).min(n.saturating_sub(1))
    }

    /// True with probability `p`; `p <= 0` never succeeds, `p >= 1` always does
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }
}

impl Dice for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded generator for a new run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Always rolls the same value
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedDice(pub f32);

#[cfg(test)]
impl Dice for FixedDice {
    fn unit(&mut self) -> f32 {
        self.0
    }
}
