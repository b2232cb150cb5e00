//! Near-complete tree builder
//!
//! The canonical "almost complete" target shape. For a key range of
//! size `n` with `h = ⌊log2 n⌋ + 1` levels, the root index is chosen in
//! one of two regimes split at the thresholds `2^(h-1)` and
//! `2^(h-1) + 2^(h-2)`, and the same rule recurses on both key
//! sublists. The companion classifier [`p`] buckets `n` into
//! `{+1, 0, -1}` from the same thresholds; it feeds the rotation-count
//! formulas only and plays no part in construction.

use crate::tree::{Key, Node, NodeId};
use crate::{BalanceError, Bst};

/// Number of levels in a near-complete tree of `n` nodes:
/// `⌊log2 n⌋ + 1`. Note this counts levels, not edges.
///
/// # Panics
///
/// Panics if `n == 0`; trees are never empty.
pub fn levels(n: usize) -> u32 {
    n.ilog2() + 1
}

/// Regime thresholds for size `n`: `(2^(h-1), 2^(h-1) + 2^(h-2), 2^h)`.
/// `2^(h-2)` truncates to 0 at `h == 1`, so a single node lands in the
/// upper regime.
fn thresholds(n: usize) -> (usize, usize, usize) {
    let h = levels(n);
    let half = 1usize << (h - 1);
    let quarter = if h >= 2 { 1usize << (h - 2) } else { 0 };
    (half, half + quarter, 1usize << h)
}

/// Index of the root key within a sorted key range of size `n`.
///
/// # Panics
///
/// Panics if `n == 0`, or via `unreachable!` if `n` falls outside both
/// regimes - impossible given how [`levels`] is computed, and loud if a
/// defect ever makes it otherwise.
pub fn root_index(n: usize) -> usize {
    let (half, v, full) = thresholds(n);
    if half <= n && n + 2 <= v {
        n - (v - half)
    } else if v <= n + 1 && n < full {
        half - 1
    } else {
        unreachable!("root index classification failed: n={n}, levels={}", levels(n));
    }
}

/// Classifier feeding the rotation-count formulas: `+1`, `0`, or `-1`
/// depending on where `n` sits between the regime thresholds.
///
/// # Panics
///
/// As [`root_index`].
pub fn p(n: usize) -> i64 {
    let (half, v, full) = thresholds(n);
    if half <= n && n + 2 <= v {
        1
    } else if n + 1 == v {
        0
    } else if v <= n && n < full {
        -1
    } else {
        unreachable!("p classification failed: n={n}, levels={}", levels(n));
    }
}

/// Build the canonical near-complete tree over `keys`.
///
/// Keys are sorted internally; empty input fails with
/// [`BalanceError::EmptyKeys`] and a repeated key with
/// [`BalanceError::DuplicateKey`], before any node is built.
pub fn near_complete<I>(keys: I) -> Result<Bst, BalanceError>
where
    I: IntoIterator<Item = Key>,
{
    let mut sorted: Vec<Key> = keys.into_iter().collect();
    if sorted.is_empty() {
        return Err(BalanceError::EmptyKeys);
    }
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(BalanceError::DuplicateKey(pair[0]));
        }
    }

    let mut nodes = Vec::with_capacity(sorted.len());
    let root = build_range(&mut nodes, None, &sorted);
    Ok(Bst::from_parts(nodes, root.expect("sorted key list is non-empty")))
}

fn build_range(nodes: &mut Vec<Node>, parent: Option<NodeId>, keys: &[Key]) -> Option<NodeId> {
    if keys.is_empty() {
        return None;
    }
    let idx = root_index(keys.len());
    let id = NodeId::from_index(nodes.len());
    let mut node = Node::new(keys[idx]);
    node.parent = parent;
    nodes.push(node);

    let left = build_range(nodes, Some(id), &keys[..idx]);
    nodes[id.index()].left = left;
    let right = build_range(nodes, Some(id), &keys[idx + 1..]);
    nodes[id.index()].right = right;
    Some(id)
}
