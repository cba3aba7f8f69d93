//! Seeded randomness for serves and AI reaction misses.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Match-local random number generator
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// True with probability `p`. Never draws when `p` is zero.
    pub fn chance(&mut self, p: f64) -> bool {
        p > 0.0 && self.0.gen_bool(p.min(1.0))
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
