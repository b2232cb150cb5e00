//! Maximal subtree matching between two trees over one key set
//!
//! Two flavors feed the balancing algorithms: *identical* subtrees
//! (same keys, same shape - A2 exempts them from folding) and
//! *equivalent* subtrees (same key set, shape free - A3 equalizes them
//! pairwise before handing over to A2). Both are found bottom-up.

use std::collections::{HashMap, HashSet};

use crate::tree::Key;
use crate::{BalanceError, Bst};

/// The `[min, max]` rank span of a subtree's keys under the whole
/// tree's in-order ranking.
///
/// A derived value: any rotation or insertion invalidates it, so
/// intervals are recomputed per call and never stored on nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexInterval {
    /// Smallest rank in the subtree
    pub min: usize,
    /// Largest rank in the subtree
    pub max: usize,
}

/// Check that both trees hold exactly the same key set.
pub(crate) fn ensure_same_keys(s: &Bst, t: &Bst) -> Result<(), BalanceError> {
    if s.key_set() != t.key_set() {
        return Err(BalanceError::KeySetMismatch);
    }
    Ok(())
}

/// Vertex interval of every node's subtree, keyed by node key.
///
/// Ranks come from one in-order walk; the intervals are then assembled
/// bottom-up in post-order, so each node only consults its children.
pub fn vertex_intervals(tree: &Bst) -> HashMap<Key, VertexInterval> {
    let mut ranks = HashMap::with_capacity(tree.size());
    for (rank, id) in tree.in_order().into_iter().enumerate() {
        ranks.insert(tree.key(id), rank);
    }

    let mut intervals: HashMap<Key, VertexInterval> = HashMap::with_capacity(tree.size());
    for id in tree.post_order() {
        let key = tree.key(id);
        let mut min = ranks[&key];
        let mut max = min;
        if let Some(l) = tree.left(id) {
            min = intervals[&tree.key(l)].min;
        }
        if let Some(r) = tree.right(id) {
            max = intervals[&tree.key(r)].max;
        }
        intervals.insert(key, VertexInterval { min, max });
    }
    intervals
}

/// Roots of the maximal identical subtrees of `s` and `t`: subtrees
/// equal in both shape and keys, each not contained in a larger one.
///
/// Bottom-up dynamic program over a post-order walk of `s`. A node
/// joins the result iff every present child is currently a member and
/// its immediate child keys coincide with those of the same-key node in
/// `t`; membership of the children already certifies their subtrees
/// equal, so no full subtree re-comparison is needed. When a node
/// joins, its children leave - ancestors subsume descendants.
pub fn maximal_identical_subtrees(s: &Bst, t: &Bst) -> Result<HashSet<Key>, BalanceError> {
    ensure_same_keys(s, t)?;

    let mut roots: HashSet<Key> = HashSet::new();
    for id in s.post_order() {
        let child_keys: Vec<Key> = [s.left(id), s.right(id)]
            .into_iter()
            .flatten()
            .map(|c| s.key(c))
            .collect();
        if !child_keys.iter().all(|k| roots.contains(k)) {
            continue;
        }

        let Some(t_id) = t.search(s.key(id)) else {
            continue;
        };
        let same_left = s.left(id).map(|c| s.key(c)) == t.left(t_id).map(|c| t.key(c));
        let same_right = s.right(id).map(|c| s.key(c)) == t.right(t_id).map(|c| t.key(c));
        if same_left && same_right {
            roots.insert(s.key(id));
            // This is a maximal subtree now, so its children are not.
            for k in &child_keys {
                roots.remove(k);
            }
        }
    }

    Ok(roots)
}

/// Roots of the maximal equivalent subtrees of `s` and `t`: subtrees
/// rooted at the same key in both trees whose key *sets* coincide,
/// shapes free to differ.
///
/// A key qualifies iff its subtrees span the same vertex interval in
/// both trees - for a BST a subtree's key set is exactly a rank
/// interval, so interval equality is key-set equality. The result keeps
/// only qualifying keys with no qualifying proper ancestor in `s`,
/// which makes members pairwise key-disjoint in both trees and no
/// member's parent itself qualifying. Every identical-subtree root
/// qualifies, so each is either a member or covered by one.
pub fn maximal_equivalent_subtrees(s: &Bst, t: &Bst) -> Result<HashSet<Key>, BalanceError> {
    ensure_same_keys(s, t)?;

    let iv_s = vertex_intervals(s);
    let iv_t = vertex_intervals(t);

    let mut roots = HashSet::new();
    let mut stack = vec![s.root()];
    while let Some(id) = stack.pop() {
        let key = s.key(id);
        if iv_s[&key] == iv_t[&key] {
            // Maximal: do not descend past a qualifying root.
            roots.insert(key);
        } else {
            stack.extend(s.left(id));
            stack.extend(s.right(id));
        }
    }

    Ok(roots)
}
