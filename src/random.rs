//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a reproducible RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
