//! Learn Mode scheduling.
//!
//! The only randomness in the core enters through [`RandomSource`], so
//! callers can swap in a seeded or fixed source for deterministic runs.

pub mod learn;

pub use learn::LearnAlgorithm;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// `RandomSource` backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedDraws {
    draws: Vec<f64>,
    next: usize,
}

impl FixedDraws {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            next: 0,
        }
    }

    /// Always draws the same value.
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl RandomSource for FixedDraws {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw
    }
}
