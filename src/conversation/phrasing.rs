//! Randomized reply phrasing.
//!
//! Variety only: any variant is behaviorally equivalent downstream.
//! Seedable so tests can pin the choice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct VariantPicker {
    rng: StdRng,
}

impl VariantPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one variant uniformly at random.
    pub fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.rng.gen_range(0..options.len())]
    }
}

impl Default for VariantPicker {
    fn default() -> Self {
        Self::new()
    }
}
