//! Random sources for spawning
//!
//! The spawner only ever asks for uniform draws in [0, 1), so tests can script
//! the exact sequence a round sees.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform draw in [lo, hi)
    fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index in 0..len (len must be non-zero)
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f32) as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Seeded PCG source (reproducible rounds)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values outside [0, 1) are clamped into range
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        let values: Vec<f32> = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of draws consumed so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
