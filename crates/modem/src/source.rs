//! Random bit source

use crate::common::BitSequence;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Uniform, independent bit generator backed by its own random stream
#[derive(Debug, Clone)]
pub struct BitSource {
    rng: StdRng,
}

impl BitSource {
    /// Reproducible source
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw `n` bits, each 0 or 1 with equal probability. `n == 0` yields
    /// an empty sequence.
    pub fn generate(&mut self, n: usize) -> BitSequence {
        let bits: BitSequence = (0..n).map(|_| self.rng.gen::<bool>()).collect();
        debug!(requested = n, ones = bits.count_ones(), "generated bits");
        bits
    }
}
