//! Deterministic random number generation.
//!
//! Wraps a PCG generator behind a small API so every randomized component
//! (city placement, genetic operators) takes an explicit seed and replays
//! bitwise-identically across runs.

use rand::prelude::*;
use rand::seq::index;
use rand_pcg::Pcg64;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct SimRng {
    /// Seed the generator was created from.
    master_seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Get the seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 in [min, max).
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min <= max, "Invalid range: min > max");
        min + (max - min) * self.gen_f64()
    }

    /// Uniform index in `0..len`. Returns 0 when `len == 0`.
    pub fn gen_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Two distinct indices in `0..len`, in sampling order.
    ///
    /// # Panics
    ///
    /// Panics if `len < 2`.
    pub fn distinct_pair(&mut self, len: usize) -> (usize, usize) {
        assert!(len >= 2, "Invalid range: need at least 2 indices, got {len}");
        let picked = index::sample(&mut self.rng, len, 2);
        (picked.index(0), picked.index(1))
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// A uniformly shuffled permutation of `0..n`.
    #[must_use]
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..n).collect();
        self.shuffle(&mut perm);
        perm
    }
}
