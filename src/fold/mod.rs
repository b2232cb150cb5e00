//! Forearm transformer and root aligner
//!
//! A *forearm* is a subtree folded into a single monotone rotation
//! chain: the left forearm is the path from `root.left` along right
//! links, the right forearm the mirror. Folding records every rotation
//! it performs, and the history is reversible: replaying it backwards
//! with inverted directions rebuilds the shape it came from. Subtrees
//! rooted at an ignored key are left untouched by the fold.

use std::collections::HashSet;

use crate::tree::{Key, NodeId};
use crate::{BalanceError, Bst};

/// Rotation direction recorded in a fold history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// A left rotation
    Left,
    /// A right rotation
    Right,
}

impl Direction {
    /// The opposite direction, used when a history is replayed in
    /// reverse.
    pub fn inverted(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One rotation performed during a fold: the direction and the key of
/// the node that ended up on top of the rotated edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    /// Which way the edge was rotated
    pub direction: Direction,
    /// Key of the node promoted by the rotation
    pub key: Key,
}

/// Fold the tree into its left and right forearms, leaving subtrees
/// rooted at a key in `ignored` untouched. The root itself is never
/// rotated.
///
/// Returns the ordered rotation history. Running the fold again on its
/// own output (same ignore set) performs zero rotations; size, key set
/// and in-order sequence are preserved throughout.
pub fn fold_to_forearms(tree: &mut Bst, ignored: &HashSet<Key>) -> Vec<HistoryEntry> {
    let mut history = Vec::new();

    // Fold the left subtree into the left forearm.
    let mut current = tree.left(tree.root());
    while let Some(c) = current {
        match tree.left(c) {
            Some(child) if !ignored.contains(&tree.key(child)) => {
                let promoted = tree.rotate_right(c);
                history.push(HistoryEntry {
                    direction: Direction::Right,
                    key: tree.key(promoted),
                });
                current = Some(promoted);
            }
            // Left child absent or exempt: move on down the forearm.
            _ => current = tree.right(c),
        }
    }

    // Mirror the process for the right forearm.
    let mut current = tree.right(tree.root());
    while let Some(c) = current {
        match tree.right(c) {
            Some(child) if !ignored.contains(&tree.key(child)) => {
                let promoted = tree.rotate_left(c);
                history.push(HistoryEntry {
                    direction: Direction::Left,
                    key: tree.key(promoted),
                });
                current = Some(promoted);
            }
            _ => current = tree.left(c),
        }
    }

    history
}

/// Replay `history` onto `tree` in reverse order with each direction
/// inverted, undoing the fold that produced it.
///
/// # Panics
///
/// Panics if a history entry names a key absent from the tree; a
/// history can only be replayed against a tree over the key set it was
/// recorded on.
pub fn replay_inverted(tree: &mut Bst, history: &[HistoryEntry]) {
    for entry in history.iter().rev() {
        let node = tree
            .search(entry.key)
            .expect("fold history names a key not present in the tree");
        match entry.direction.inverted() {
            Direction::Left => tree.rotate_left(node),
            Direction::Right => tree.rotate_right(node),
        };
    }
}

/// Combined length of the left and right forearms of `id`: the nodes
/// reachable by left-then-rights plus those by right-then-lefts. The
/// node itself is not counted.
pub fn forearm_span(tree: &Bst, id: NodeId) -> usize {
    let mut span = 0;

    let mut walk = tree.left(id);
    while let Some(w) = walk {
        span += 1;
        walk = tree.right(w);
    }

    let mut walk = tree.right(id);
    while let Some(w) = walk {
        span += 1;
        walk = tree.left(w);
    }

    span
}

/// Rotate the node of rank `rank` up until it is the tree root,
/// promoting it one level per rotation. Returns the number of rotations
/// performed, which equals the node's original depth.
pub fn rotate_to_root(tree: &mut Bst, rank: usize) -> Result<usize, BalanceError> {
    let node = tree.select(rank).ok_or(BalanceError::RankOutOfRange {
        rank,
        size: tree.size(),
    })?;

    let mut rotations = 0;
    while let Some(parent) = tree.parent(node) {
        if tree.left(parent) == Some(node) {
            tree.rotate_right(parent);
        } else {
            tree.rotate_left(parent);
        }
        rotations += 1;
    }
    debug_assert_eq!(tree.root(), node);
    Ok(rotations)
}
