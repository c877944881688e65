//! Deterministic random number generation.
//!
//! RULE: Gameplay code never calls a platform RNG directly.
//! All randomness flows through GameRng instances derived from
//! the master seed in the instance configuration.
//!
//! Independent streams are derived from (master_seed XOR stream * golden).
//! Adding a new stream never changes the draws of existing ones.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream.
pub struct GameRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Derive an independent stream from the master seed and a stable
    /// stream index. The index must never change once assigned.
    pub fn derived(master_seed: u64, stream: u64) -> Self {
        Self::new(master_seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15))
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n). Returns 0 when n is 0.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        self.inner.next_u64() % n
    }

    /// Roll a float in [min, max). Bounds may be given in either order.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        lo + (hi - lo) * self.next_f64()
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniformly pick one element, or None for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_u64_below(items.len() as u64) as usize;
        items.get(index)
    }
}
