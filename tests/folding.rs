//! Forearm fold, rotation history replay, and root alignment.

use std::collections::HashSet;

use treefold::{fold, BalanceError};

mod test_helpers;
use test_helpers::{chain, scrambled};

const SEEDS: [u64; 4] = [3, 17, 255, 9001];
const SIZES: [i64; 5] = [7, 12, 20, 33, 64];

#[test]
fn full_fold_produces_two_monotone_chains() {
    for seed in SEEDS {
        for n in SIZES {
            let mut tree = scrambled(n, seed);
            let keys_before = tree.in_order_keys();

            fold::fold_to_forearms(&mut tree, &HashSet::new());

            assert_eq!(tree.in_order_keys(), keys_before, "in-order must survive folding");
            assert_eq!(tree.size(), n as usize);

            // Left forearm: right-chained path, no left children anywhere.
            let root = tree.root();
            let mut on_forearms = 1;
            let mut walk = tree.left(root);
            while let Some(w) = walk {
                assert!(tree.left(w).is_none(), "left forearm node with a left child");
                on_forearms += 1;
                walk = tree.right(w);
            }
            // Right forearm: left-chained path, no right children.
            let mut walk = tree.right(root);
            while let Some(w) = walk {
                assert!(tree.right(w).is_none(), "right forearm node with a right child");
                on_forearms += 1;
                walk = tree.left(w);
            }
            assert_eq!(on_forearms, n as usize, "every node must sit on a forearm");
            assert_eq!(fold::forearm_span(&tree, root), n as usize - 1);
        }
    }
}

#[test]
fn fold_is_idempotent_under_an_ignore_set() {
    for seed in SEEDS {
        let mut tree = scrambled(33, seed);
        let ignored = HashSet::from([5, 20]);

        fold::fold_to_forearms(&mut tree, &ignored);
        let second = fold::fold_to_forearms(&mut tree, &ignored);
        assert!(second.is_empty(), "re-folding must perform zero rotations");
    }
}

#[test]
fn replaying_the_inverted_history_undoes_the_fold() {
    for seed in SEEDS {
        for n in SIZES {
            let mut tree = scrambled(n, seed);
            let original = tree.clone();

            let history = fold::fold_to_forearms(&mut tree, &HashSet::new());
            fold::replay_inverted(&mut tree, &history);

            assert_eq!(tree, original);
        }
    }
}

#[test]
fn rotate_to_root_promotes_the_selected_node() {
    for seed in SEEDS {
        for n in SIZES {
            let mut tree = scrambled(n, seed);
            let keys_before = tree.in_order_keys();
            let rank = n as usize / 3;

            let node = tree.select(rank).unwrap();
            let depth = tree.depth(node);

            let rotations = fold::rotate_to_root(&mut tree, rank).unwrap();

            assert_eq!(tree.root(), node, "selected node must end at the root");
            assert_eq!(rotations, depth, "cost must equal the node's prior depth");
            assert_eq!(tree.in_order_keys(), keys_before);
        }
    }
}

#[test]
fn rotate_to_root_propagates_out_of_range_ranks() {
    let mut tree = chain(5);
    let before = tree.clone();
    assert_eq!(
        fold::rotate_to_root(&mut tree, 5),
        Err(BalanceError::RankOutOfRange { rank: 5, size: 5 })
    );
    assert_eq!(tree, before);
}

#[test]
fn folding_an_already_forearmed_tree_is_free() {
    // 3 with left forearm 1->2 (right-chained) and right forearm
    // 5->4 (left-chained): nothing left to fold.
    let mut tree = treefold::Bst::from_keys([3, 1, 2, 5, 4]).unwrap();
    let history = fold::fold_to_forearms(&mut tree, &HashSet::new());
    assert!(history.is_empty());
}
