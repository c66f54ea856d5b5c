//! Seeded random source.
//!
//! Every solver invocation owns its own generator. A non-negative seed gives
//! a reproducible stream; `-1` samples a fresh seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Resolves a seed parameter: non-negative values pass through, negative
/// values are replaced by a freshly sampled seed.
pub fn resolve_seed(seed: i64) -> u64 {
    if seed >= 0 {
        seed as u64
    } else {
        rand::thread_rng().gen()
    }
}

/// A generator seeded with `seed` (already resolved).
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
