//! Random shape perturbation
//!
//! Manufactures experiment input: starting from any tree (typically a
//! fresh near-complete one), rotate a random selection of its edges so
//! the shape becomes arbitrary while the key set stays fixed. The
//! balancing algorithms never call this - it exists for the experiment
//! driver and the test suite.

use rand::Rng;

use crate::Bst;

/// Rotate a random selection of edges in `tree`, returning how many
/// rotations were performed.
///
/// Every internal node is a candidate; each is kept with probability
/// 99/100 · 1/2 and then rotated right if it still has a left child at
/// rotation time, otherwise left. Earlier rotations can turn a
/// candidate into a leaf, in which case it is skipped.
pub fn scramble<R: Rng>(tree: &mut Bst, rng: &mut R) -> usize {
    let candidates: Vec<_> = tree
        .in_order()
        .into_iter()
        .filter(|&id| tree.left(id).is_some() || tree.right(id).is_some())
        .filter(|_| rng.gen_range(0..100) != 0 && rng.gen_bool(0.5))
        .collect();

    let mut performed = 0;
    for id in candidates {
        if tree.left(id).is_some() {
            tree.rotate_right(id);
            performed += 1;
        } else if tree.right(id).is_some() {
            tree.rotate_left(id);
            performed += 1;
        }
    }
    performed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scramble_preserves_key_set_and_order() {
        let mut tree = shape::near_complete(0..64).unwrap();
        let keys = tree.in_order_keys();
        let mut rng = StdRng::seed_from_u64(42);
        scramble(&mut tree, &mut rng);
        assert_eq!(tree.in_order_keys(), keys);
        assert_eq!(tree.size(), 64);
    }
}
