//! RNG module - seeded generator handles
//!
//! Every random decision in the simulation flows from one seeded
//! [`SimRng`]. Automata that need randomness after construction receive
//! their own generator forked from the simulation's, so a run is fully
//! reproducible from its seed regardless of how many entities are alive.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::Direction;

/// Deterministic generator used throughout the simulation.
pub type SimRng = ChaCha8Rng;

/// Create a generator from a seed.
pub fn seeded(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derive an independent child generator, advancing the parent.
pub fn fork(parent: &mut SimRng) -> SimRng {
    ChaCha8Rng::seed_from_u64(parent.gen())
}

/// Pick one of the four cardinal directions uniformly.
pub fn pick_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

/// Weighted pick from `items`, where `weights[i]` is the weight of `items[i]`.
///
/// Returns `None` when the slices are empty or every weight is zero.
pub fn pick_weighted<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T], weights: &[u32]) -> Option<T> {
    let total: u32 = weights.iter().take(items.len()).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for (item, &weight) in items.iter().zip(weights) {
        if roll < weight {
            return Some(*item);
        }
        roll -= weight;
    }
    None
}
