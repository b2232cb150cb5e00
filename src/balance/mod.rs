//! Balancing algorithms A1, A2, A3
//!
//! All three transform an arbitrary tree `S` in place into the shape of
//! a near-complete target `T` over the same key set and report the
//! rotations spent next to the closed-form count the theory predicts.
//!
//! The shared skeleton: rotate the target's root key to the root of
//! `S`, fold `S` into its forearms, fold a fresh copy of `T` the same
//! way while recording the rotation history, then replay that history
//! onto `S` in reverse with inverted directions. Both folds reduce to
//! the same canonical shape (same root key, key set and ignore set), so
//! the replay reconstructs exactly `T`.
//!
//! Aliasing `S` and `T` is unrepresentable here: the `&mut`/`&` borrow
//! pair rules out handing the same tree to both parameters.

use std::collections::HashSet;

use tracing::debug;

use crate::matcher::{self, ensure_same_keys};
use crate::{fold, shape, BalanceError, Bst};

/// Rotation counts from one algorithm invocation: what was actually
/// performed against what the algorithm's formula predicts (an exact
/// count for A1, an estimate for A2, an upper bound for A3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationStats {
    /// Rotations performed on `S` (and, for A3, its subtree copies)
    pub actual: usize,
    /// Rotations predicted by the closed-form formula; signed because
    /// the formulas subtract accounting terms
    pub expected: i64,
}

fn floor_log2(n: usize) -> i64 {
    i64::from(n.ilog2())
}

/// A1: the baseline transformation.
///
/// Aligns the target root, folds everything, and replays the target's
/// fold history. The expected count is the closed form
/// `2n - 2⌊log2 n⌋ + p(n) - cs(rootT) - 1`, where `cs(rootT)` is the
/// combined forearm span of the target-root node in `S` before any
/// rotation; A1's actual count always matches it.
pub fn a1(s: &mut Bst, t: &Bst) -> Result<RotationStats, BalanceError> {
    ensure_same_keys(s, t)?;

    let n = t.size();
    let root_rank = shape::root_index(n);
    let target = s.select(root_rank).ok_or(BalanceError::RankOutOfRange {
        rank: root_rank,
        size: n,
    })?;
    // Accounting only: the formula discounts nodes already on the
    // future root's forearms.
    let cs_root = fold::forearm_span(s, target) as i64;

    let mut actual = fold::rotate_to_root(s, root_rank)?;
    actual += fold::fold_to_forearms(s, &HashSet::new()).len();

    let mut t_prime = shape::near_complete(t.in_order_keys())?;
    debug_assert_eq!(&t_prime, t);
    let history = fold::fold_to_forearms(&mut t_prime, &HashSet::new());
    fold::replay_inverted(s, &history);
    actual += history.len();

    debug_assert_eq!(s, t);
    debug!(n, root_rank, cs_root, actual, "a1 complete");

    Ok(RotationStats {
        actual,
        expected: 2 * n as i64 - 2 * floor_log2(n) + shape::p(n) - cs_root - 1,
    })
}

/// A2: A1 minus the rotations A1 would waste on subtrees `S` and `T`
/// already share.
///
/// Maximal identical subtrees are computed up front and exempted from
/// both folds, so they ride along unchanged. With no shared subtree
/// this is exactly A1. When the shared subtree is the whole tree, `S`
/// already equals `T` and nothing needs rotating at all.
pub fn a2(s: &mut Bst, t: &Bst) -> Result<RotationStats, BalanceError> {
    ensure_same_keys(s, t)?;

    let matched = matcher::maximal_identical_subtrees(s, t)?;
    if matched.is_empty() {
        return a1(s, t);
    }
    if matched.contains(&s.key(s.root())) {
        // The whole tree is one identical subtree.
        debug_assert_eq!(s, t);
        return Ok(RotationStats {
            actual: 0,
            expected: 0,
        });
    }

    // Both accounting terms are taken before any rotation.
    let subtree_term: i64 = matched
        .iter()
        .map(|k| {
            let id = s.search(*k).expect("matched root key is present in S");
            s.subtree_size(id) as i64
        })
        .sum();

    let n = t.size();
    let root_rank = shape::root_index(n);
    let target = s.select(root_rank).ok_or(BalanceError::RankOutOfRange {
        rank: root_rank,
        size: n,
    })?;
    let cs_root = fold::forearm_span(s, target) as i64;

    let rotations_root = fold::rotate_to_root(s, root_rank)?;
    let rotations_fold = fold::fold_to_forearms(s, &matched).len();

    let mut t_prime = shape::near_complete(t.in_order_keys())?;
    debug_assert_eq!(&t_prime, t);
    let history = fold::fold_to_forearms(&mut t_prime, &matched);
    fold::replay_inverted(s, &history);

    debug_assert_eq!(s, t);
    debug!(
        n,
        matched = matched.len(),
        subtree_term,
        cs_root,
        "a2 complete"
    );

    Ok(RotationStats {
        actual: rotations_root + rotations_fold + history.len(),
        expected: 2 * n as i64 - 2 * floor_log2(n) - 2 * subtree_term - cs_root,
    })
}

/// A3: equalize equivalent subtrees first, then let A2 skip them.
///
/// Each maximal equivalent subtree pair (same key set, possibly
/// different shape) is transformed with A1 in isolation so it becomes
/// identical across the trees; `g` counts only the pairs that actually
/// needed work. A2 then runs on the whole tree and benefits from the
/// enlarged identical set. The expected value is a genuine upper bound,
/// not a tight count.
pub fn a3(s: &mut Bst, t: &Bst) -> Result<RotationStats, BalanceError> {
    ensure_same_keys(s, t)?;

    let equivalent = matcher::maximal_equivalent_subtrees(s, t)?;

    // Accounting terms, before any rotation touches S.
    let subtree_term: i64 = equivalent
        .iter()
        .map(|k| {
            let id = s.search(*k).expect("equivalent root key is present in S");
            floor_log2(s.subtree_size(id))
        })
        .sum();
    let n = t.size();
    let root_rank = shape::root_index(n);
    let target = s.select(root_rank).ok_or(BalanceError::RankOutOfRange {
        rank: root_rank,
        size: n,
    })?;
    let cs_root = fold::forearm_span(s, target) as i64;

    // Make every equivalent pair identical by running A1 on extracted
    // copies and grafting the resulting shape back into S.
    let mut rotations_pairs = 0;
    let mut g = 0i64;
    for key in &equivalent {
        let s_id = s.search(*key).expect("equivalent root key is present in S");
        let t_id = t.search(*key).expect("equivalent root key is present in T");
        let mut sub_s = s.extract_subtree(s_id);
        let sub_t = t.extract_subtree(t_id);
        if sub_s != sub_t {
            g += 1;
            rotations_pairs += a1(&mut sub_s, &sub_t)?.actual;
            s.adopt_subtree_shape(s_id, &sub_s);
        }
    }

    let stats = a2(s, t)?;

    debug_assert_eq!(s, t);
    debug!(
        n,
        equivalent = equivalent.len(),
        g,
        rotations_pairs,
        "a3 complete"
    );

    Ok(RotationStats {
        actual: rotations_pairs + stats.actual,
        expected: 2 * n as i64 - 2 * floor_log2(n) - cs_root - 2 * subtree_term + g + 1,
    })
}
