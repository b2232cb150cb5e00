//! Shared helpers for building test trees

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use treefold::{perturb, shape, Bst, Key};

/// Fully right-skewed chain over `1..=n`, depth `n - 1`.
pub fn chain(n: Key) -> Bst {
    Bst::from_keys(1..=n).unwrap()
}

/// Canonical near-complete target over `1..=n`.
pub fn target(n: Key) -> Bst {
    shape::near_complete(1..=n).unwrap()
}

/// Near-complete tree over `1..=n` scrambled by seeded random
/// rotations: an arbitrary BST over the same key set.
pub fn scrambled(n: Key, seed: u64) -> Bst {
    let mut tree = target(n);
    let mut rng = StdRng::seed_from_u64(seed);
    perturb::scramble(&mut tree, &mut rng);
    tree
}

/// `1..=n` in a seeded random insertion order.
pub fn shuffled_keys(n: Key, seed: u64) -> Vec<Key> {
    let mut keys: Vec<Key> = (1..=n).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(seed));
    keys
}
