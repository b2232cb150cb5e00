//! In-order and post-order walks
//!
//! Traversal order is a contract other components lean on: the subtree
//! matcher consumes post-order (children before parents, so membership
//! checks are bottom-up), and the fold/replay machinery relies on the
//! in-order sequence being invariant under rotation.

use super::{Bst, Key, NodeId};

impl Bst {
    /// Nodes of the whole tree in in-order (ascending key) order.
    pub fn in_order(&self) -> Vec<NodeId> {
        self.in_order_within(self.root())
    }

    /// Keys of the whole tree in ascending order.
    pub fn in_order_keys(&self) -> Vec<Key> {
        self.in_order().into_iter().map(|id| self.key(id)).collect()
    }

    /// Nodes of the subtree rooted at `id`, in-order.
    pub fn in_order_within(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_in_order(id, &mut out);
        out
    }

    fn walk_in_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(l) = self.left(id) {
            self.walk_in_order(l, out);
        }
        out.push(id);
        if let Some(r) = self.right(id) {
            self.walk_in_order(r, out);
        }
    }

    /// Nodes of the whole tree in post-order (children before parents).
    pub fn post_order(&self) -> Vec<NodeId> {
        self.post_order_within(self.root())
    }

    /// Nodes of the subtree rooted at `id`, post-order.
    pub fn post_order_within(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_post_order(id, &mut out);
        out
    }

    fn walk_post_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(l) = self.left(id) {
            self.walk_post_order(l, out);
        }
        if let Some(r) = self.right(id) {
            self.walk_post_order(r, out);
        }
        out.push(id);
    }
}

#[cfg(test)]
mod tests {
    use crate::Bst;

    #[test]
    fn in_order_is_sorted_regardless_of_insertion_order() {
        let tree = Bst::from_keys([5, 1, 9, 3, 7]).unwrap();
        assert_eq!(tree.in_order_keys(), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn post_order_visits_children_first() {
        let tree = Bst::from_keys([4, 2, 6, 1, 3, 5, 7]).unwrap();
        let keys: Vec<_> = tree.post_order().into_iter().map(|id| tree.key(id)).collect();
        assert_eq!(keys, vec![1, 3, 2, 5, 7, 6, 4]);
    }
}
