//! Property tests for the tree primitives: construction, rotation,
//! order-statistic selection, insertion.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use treefold::{shape, BalanceError, Bst};

fn arb_keys() -> impl Strategy<Value = Vec<i64>> {
    // Distinct sorted keys; shuffled separately so tree shapes vary.
    proptest::collection::btree_set(-1000i64..1000, 1..64)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn in_order_is_sorted_for_any_insertion_order(
        keys in arb_keys(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = keys.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        let tree = Bst::from_keys(shuffled).unwrap();
        prop_assert_eq!(tree.in_order_keys(), keys);
    }

    #[test]
    fn select_returns_the_rank_th_smallest(
        keys in arb_keys(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = keys.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        let tree = Bst::from_keys(shuffled).unwrap();

        for (rank, key) in keys.iter().enumerate() {
            let id = tree.select(rank).expect("rank within size");
            prop_assert_eq!(tree.key(id), *key);
        }
        prop_assert!(tree.select(keys.len()).is_none());
    }

    #[test]
    fn rotation_preserves_in_order_and_round_trips(
        keys in arb_keys(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = keys.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        let mut tree = Bst::from_keys(shuffled).unwrap();
        let original = tree.clone();

        let rotatable = tree.post_order().into_iter().find(|&id| tree.right(id).is_some());
        if let Some(x) = rotatable {
            let y = tree.rotate_left(x);
            prop_assert_eq!(tree.in_order_keys(), keys);
            prop_assert_eq!(tree.size(), original.size());

            // Rotating the same edge back restores the exact shape.
            tree.rotate_right(y);
            prop_assert_eq!(&tree, &original);
        }
    }

    #[test]
    fn duplicate_insert_fails_and_leaves_the_tree_unchanged(
        keys in arb_keys(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = keys.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        let mut tree = Bst::from_keys(shuffled).unwrap();
        let before = tree.clone();

        let dup = keys[keys.len() / 2];
        prop_assert_eq!(tree.insert(dup), Err(BalanceError::DuplicateKey(dup)));
        prop_assert_eq!(&tree, &before);
    }

    #[test]
    fn near_complete_build_is_sorted_with_logarithmic_height(keys in arb_keys()) {
        let tree = shape::near_complete(keys.clone()).unwrap();
        prop_assert_eq!(tree.size(), keys.len());
        prop_assert_eq!(tree.in_order_keys(), keys.clone());
        prop_assert_eq!(tree.height(), keys.len().ilog2() as usize);
    }
}

#[test]
fn empty_key_collection_is_rejected() {
    assert_eq!(
        Bst::from_keys(std::iter::empty::<i64>()),
        Err(BalanceError::EmptyKeys)
    );
}
