//! A single deterministic RNG owned by the engine.
//!
//! Every random choice in the system — the spawner's origin/destination
//! pairs, the morning-rush coin flip — routes through one `SimRng` held by
//! the engine handle, never a thread-local or freshly-seeded generator. That
//! is what makes the determinism law in the testable properties hold: same
//! seed, same command trace, same snapshots.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Deterministic, seedable RNG for all engine-level random choices.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Integer uniformly distributed in `[low, high]` (inclusive both ends).
    #[inline]
    pub fn gen_range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        self.0.gen_range(low..=high)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
