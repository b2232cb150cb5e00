//! # Balancing Binary Search Trees via Rotation
//!
//! This library implements a rotation-based balancing engine: three
//! increasingly refined algorithms that transform an arbitrary binary
//! search tree `S` into a near-complete target tree `T` over the same
//! key set, using a bounded number of edge rotations.
//!
//! ## Core Algorithms
//!
//! 1. **A1**: rotate the target's root key into root position, fold both
//!    trees into their forearms, replay the target's fold history onto
//!    `S` in reverse
//! 2. **A2**: as A1, but maximal identical subtrees of `S` and `T` are
//!    exempted from folding and cost no rotations
//! 3. **A3**: first equalize maximal *equivalent* subtrees (same key
//!    set, different shape) pairwise with A1, then run A2
//!
//! Each algorithm reports the rotations it actually performed next to
//! the count predicted by its closed-form formula.
//!
//! ## Usage Example
//!
//! ```ignore
//! use treefold::{balance, shape, Bst};
//!
//! let target = shape::near_complete(0..1000)?;
//! let mut source = Bst::from_keys(0..1000)?;
//! let stats = balance::a1(&mut source, &target)?;
//! assert_eq!(source, target);
//! assert_eq!(stats.actual as i64, stats.expected);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements one component of the engine
pub mod balance; // Balancing algorithms A1, A2, A3
pub mod fold; // Forearm transformer and root aligner
pub mod matcher; // Identical/equivalent subtree matching
pub mod perturb; // Random rotation scrambling for experiments
pub mod shape; // Near-complete tree builder
pub mod tree; // Arena-backed BST primitives

// Re-exports for convenience
pub use balance::RotationStats;
pub use fold::{Direction, HistoryEntry};
pub use matcher::VertexInterval;
pub use tree::{Bst, Key, NodeId};

use thiserror::Error;

/// Errors surfaced by tree constructors and the balancing algorithms.
///
/// Validation is front-loaded: a rejected call leaves every tree
/// involved unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    /// A tree constructor was given no keys; trees are never empty.
    #[error("key collection must be non-empty")]
    EmptyKeys,

    /// Insertion of a key that is already present.
    #[error("key {0} already in tree")]
    DuplicateKey(Key),

    /// A caller named a rank outside `[0, size)` where one must exist.
    #[error("rank {rank} out of range for tree of {size} nodes")]
    RankOutOfRange {
        /// The rank that was requested
        rank: usize,
        /// Number of nodes in the tree
        size: usize,
    },

    /// The two trees handed to an algorithm hold different key sets.
    #[error("trees must contain the same key set")]
    KeySetMismatch,
}
