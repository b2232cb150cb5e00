//! Arena-backed binary search tree
//!
//! A non-empty rooted tree over unique keys. Nodes are stored in a flat
//! arena and addressed by [`NodeId`] handles, which removes the
//! child/parent ownership cycle while keeping rotation O(1) and upward
//! walks O(height).
//!
//! Structural equality and hashing are defined over (key, left, right)
//! only. The parent link is deliberately excluded: two independently
//! rooted trees of the same shape compare equal, and the comparison
//! cannot recurse through the child/parent cycle.

mod node;
mod traversal;

pub use node::{Key, NodeId};

pub(crate) use node::Node;

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::BalanceError;

/// A non-empty binary search tree. Duplicate keys are not permitted.
#[derive(Debug, Clone)]
pub struct Bst {
    /// Node arena; slots are never recycled since the engine has no
    /// deletion operation, so `nodes.len()` is the tree size.
    nodes: Vec<Node>,

    /// Root of the tree, always present
    root: NodeId,
}

impl Bst {
    /// Build a tree by inserting `keys` in iteration order.
    ///
    /// Fails with [`BalanceError::EmptyKeys`] on an empty collection and
    /// [`BalanceError::DuplicateKey`] on a repeated key.
    pub fn from_keys<I>(keys: I) -> Result<Self, BalanceError>
    where
        I: IntoIterator<Item = Key>,
    {
        let mut keys = keys.into_iter();
        let first = keys.next().ok_or(BalanceError::EmptyKeys)?;
        let mut tree = Self {
            nodes: vec![Node::new(first)],
            root: NodeId(0),
        };
        for key in keys {
            tree.insert(key)?;
        }
        Ok(tree)
    }

    /// Construct directly from an arena and root (shape builder use).
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes, root }
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Root of the tree.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Key held by `id`.
    #[inline]
    pub fn key(&self, id: NodeId) -> Key {
        self.node(id).key
    }

    /// Left child of `id`, if any.
    #[inline]
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    /// Right child of `id`, if any.
    #[inline]
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    /// Parent of `id`; `None` at the root.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Number of edges on the path from `id` up to the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut walk = id;
        while let Some(p) = self.parent(walk) {
            depth += 1;
            walk = p;
        }
        depth
    }

    /// Height of the tree: edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    fn height_of(&self, id: NodeId) -> usize {
        let mut h = 0;
        if let Some(l) = self.left(id) {
            h = h.max(1 + self.height_of(l));
        }
        if let Some(r) = self.right(id) {
            h = h.max(1 + self.height_of(r));
        }
        h
    }

    /// Number of nodes in the subtree rooted at `id`.
    pub fn subtree_size(&self, id: NodeId) -> usize {
        let mut size = 1;
        if let Some(l) = self.left(id) {
            size += self.subtree_size(l);
        }
        if let Some(r) = self.right(id) {
            size += self.subtree_size(r);
        }
        size
    }

    /// Insert a new key, returning the id of the created node.
    ///
    /// Fails with [`BalanceError::DuplicateKey`] if `key` is already
    /// present; the tree is unchanged after a failed call.
    pub fn insert(&mut self, key: Key) -> Result<NodeId, BalanceError> {
        let mut parent = self.root;
        loop {
            if key < self.key(parent) {
                match self.left(parent) {
                    Some(l) => parent = l,
                    None => {
                        let id = self.alloc(key, parent);
                        self.node_mut(parent).left = Some(id);
                        return Ok(id);
                    }
                }
            } else if key > self.key(parent) {
                match self.right(parent) {
                    Some(r) => parent = r,
                    None => {
                        let id = self.alloc(key, parent);
                        self.node_mut(parent).right = Some(id);
                        return Ok(id);
                    }
                }
            } else {
                return Err(BalanceError::DuplicateKey(key));
            }
        }
    }

    fn alloc(&mut self, key: Key, parent: NodeId) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let mut node = Node::new(key);
        node.parent = Some(parent);
        self.nodes.push(node);
        id
    }

    /// Find the node holding `key`, if present.
    pub fn search(&self, key: Key) -> Option<NodeId> {
        let mut walk = self.root;
        loop {
            if key == self.key(walk) {
                return Some(walk);
            }
            let next = if key < self.key(walk) {
                self.left(walk)
            } else {
                self.right(walk)
            };
            walk = next?;
        }
    }

    /// Node of rank `rank`: the node larger than exactly `rank` other
    /// keys in the tree. Rank 0 is the smallest key. Out-of-range ranks
    /// are a normal not-found result, not an error.
    pub fn select(&self, rank: usize) -> Option<NodeId> {
        if rank >= self.size() {
            return None;
        }
        Some(self.select_in(self.root, rank))
    }

    fn select_in(&self, id: NodeId, rank: usize) -> NodeId {
        let r = self.left(id).map_or(0, |l| self.subtree_size(l));
        if rank == r {
            id
        } else if rank < r {
            let l = self.left(id).expect("rank below node implies a left subtree");
            self.select_in(l, rank)
        } else {
            let r_child = self.right(id).expect("rank above node implies a right subtree");
            self.select_in(r_child, rank - r - 1)
        }
    }

    /// Smallest node in the subtree rooted at `id`.
    pub fn minimum(&self, id: NodeId) -> NodeId {
        let mut walk = id;
        while let Some(l) = self.left(walk) {
            walk = l;
        }
        walk
    }

    /// Largest node in the subtree rooted at `id`.
    pub fn maximum(&self, id: NodeId) -> NodeId {
        let mut walk = id;
        while let Some(r) = self.right(walk) {
            walk = r;
        }
        walk
    }

    /// Left-rotate the edge between `x` and `x.right`; returns the new
    /// parent of `x`. Preserves the in-order key sequence.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no right child. Rotating a node without the
    /// required child is a programming error, not a recoverable state.
    pub fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let y = self.right(x).expect("rotate_left requires a right child");

        let beta = self.left(y);
        self.node_mut(x).right = beta;
        if let Some(b) = beta {
            self.node_mut(b).parent = Some(x);
        }

        let p = self.parent(x);
        self.node_mut(y).parent = p;
        match p {
            None => self.root = y,
            Some(p) => {
                if self.left(p) == Some(x) {
                    self.node_mut(p).left = Some(y);
                } else {
                    self.node_mut(p).right = Some(y);
                }
            }
        }

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
        y
    }

    /// Right-rotate the edge between `y` and `y.left`; returns the new
    /// parent of `y`. Preserves the in-order key sequence.
    ///
    /// # Panics
    ///
    /// Panics if `y` has no left child.
    pub fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let x = self.left(y).expect("rotate_right requires a left child");

        let beta = self.right(x);
        self.node_mut(y).left = beta;
        if let Some(b) = beta {
            self.node_mut(b).parent = Some(y);
        }

        let p = self.parent(y);
        self.node_mut(x).parent = p;
        match p {
            None => self.root = x,
            Some(p) => {
                if self.right(p) == Some(y) {
                    self.node_mut(p).right = Some(x);
                } else {
                    self.node_mut(p).left = Some(x);
                }
            }
        }

        self.node_mut(x).right = Some(y);
        self.node_mut(y).parent = Some(x);
        x
    }

    /// Set of all keys in the tree.
    pub fn key_set(&self) -> HashSet<Key> {
        self.nodes.iter().map(|n| n.key).collect()
    }

    /// Structural equality of the subtree at `a` in `self` against the
    /// subtree at `b` in `other`: same keys, same shape. Parent links
    /// play no part.
    pub fn subtree_eq(&self, a: NodeId, other: &Bst, b: NodeId) -> bool {
        if self.key(a) != other.key(b) {
            return false;
        }
        let left_eq = match (self.left(a), other.left(b)) {
            (None, None) => true,
            (Some(l), Some(m)) => self.subtree_eq(l, other, m),
            _ => false,
        };
        if !left_eq {
            return false;
        }
        match (self.right(a), other.right(b)) {
            (None, None) => true,
            (Some(r), Some(s)) => self.subtree_eq(r, other, s),
            _ => false,
        }
    }

    /// Deep-copy the subtree rooted at `id` into a standalone tree.
    pub fn extract_subtree(&self, id: NodeId) -> Bst {
        let mut nodes = Vec::with_capacity(self.subtree_size(id));
        let root = self.copy_into(id, None, &mut nodes);
        Bst { nodes, root }
    }

    fn copy_into(&self, id: NodeId, parent: Option<NodeId>, nodes: &mut Vec<Node>) -> NodeId {
        let new_id = NodeId::from_index(nodes.len());
        let mut node = Node::new(self.key(id));
        node.parent = parent;
        nodes.push(node);
        if let Some(l) = self.left(id) {
            let copied = self.copy_into(l, Some(new_id), nodes);
            nodes[new_id.index()].left = Some(copied);
        }
        if let Some(r) = self.right(id) {
            let copied = self.copy_into(r, Some(new_id), nodes);
            nodes[new_id.index()].right = Some(copied);
        }
        new_id
    }

    /// Rewire the subtree rooted at `at` to mirror `shape`, which must
    /// hold exactly the same key set. The existing nodes are relinked in
    /// place; no allocation, no key moves.
    pub(crate) fn adopt_subtree_shape(&mut self, at: NodeId, shape: &Bst) {
        let ids: std::collections::HashMap<Key, NodeId> = self
            .post_order_within(at)
            .into_iter()
            .map(|id| (self.key(id), id))
            .collect();
        debug_assert_eq!(ids.len(), shape.size());

        let parent = self.parent(at);
        let attach_left = parent.map(|p| self.left(p) == Some(at));
        let new_root = self.wire_shape(&ids, shape, shape.root(), parent);
        match parent {
            None => self.root = new_root,
            Some(p) => {
                if attach_left == Some(true) {
                    self.node_mut(p).left = Some(new_root);
                } else {
                    self.node_mut(p).right = Some(new_root);
                }
            }
        }
    }

    fn wire_shape(
        &mut self,
        ids: &std::collections::HashMap<Key, NodeId>,
        shape: &Bst,
        shape_id: NodeId,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = ids[&shape.key(shape_id)];
        let left = shape
            .left(shape_id)
            .map(|c| self.wire_shape(ids, shape, c, Some(id)));
        let right = shape
            .right(shape_id)
            .map(|c| self.wire_shape(ids, shape, c, Some(id)));
        let node = self.node_mut(id);
        node.left = left;
        node.right = right;
        node.parent = parent;
        id
    }

    fn hash_subtree<H: Hasher>(&self, id: NodeId, state: &mut H) {
        self.key(id).hash(state);
        match self.left(id) {
            Some(l) => {
                1u8.hash(state);
                self.hash_subtree(l, state);
            }
            None => 0u8.hash(state),
        }
        match self.right(id) {
            Some(r) => {
                1u8.hash(state);
                self.hash_subtree(r, state);
            }
            None => 0u8.hash(state),
        }
    }
}

impl PartialEq for Bst {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.subtree_eq(self.root, other, other.root)
    }
}

impl Eq for Bst {}

impl Hash for Bst {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_subtree(self.root, state);
    }
}
