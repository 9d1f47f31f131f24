//! Random number helpers shared by the puzzle builders and the solver.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a seeded RNG.
///
/// The same seed always yields the same stream on a given platform.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniformly shuffles `items` in place (Fisher-Yates).
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Draws a fresh seed for an independent child RNG.
///
/// Used to give each parallel task its own stream without sharing the
/// driver RNG across threads.
pub fn fork_seed<R: Rng>(rng: &mut R) -> u64 {
    rng.random()
}
