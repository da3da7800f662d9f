use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::NodeId;
use crate::tree::Tree;

/// Breadth-first walk: a node's children are queued right after it is yielded, left before right.
#[derive(Debug, Clone)]
pub struct LevelOrder<'a> {
    tree: &'a Tree,
    root: Option<NodeId>,
    queue: VecDeque<NodeId>,
}

impl<'a> LevelOrder<'a> {
    /// An id that doesn't belong to `tree` produces an empty walk.
    pub fn new(tree: &'a Tree, root: NodeId) -> Self {
        let root = tree.get(root).ok().map(|_| root);
        let mut iter = Self {
            tree,
            root,
            queue: VecDeque::new(),
        };
        iter.restart();
        iter
    }

    pub fn restart(&mut self) {
        self.queue.clear();
        self.queue.extend(self.root);
    }
}

impl Iterator for LevelOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let node = self.tree.node(id);

        self.queue.extend(node.left());
        self.queue.extend(node.right());

        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // everything still reachable is at most the whole arena
        (self.queue.len(), Some(self.tree.len()))
    }
}

impl FusedIterator for LevelOrder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tree: &Tree, iter: LevelOrder) -> Vec<i32> {
        iter.map(|id| tree.node(id).value()).collect()
    }

    #[test]
    fn test_single_node() {
        let tree = Tree::from_values(42, []).unwrap();
        let iter = LevelOrder::new(&tree, tree.root());
        assert_eq!(values(&tree, iter), vec![42]);
    }

    #[test]
    fn test_level_order() {
        let tree = Tree::from_values(50, [30, 70, 20, 40, 60, 80, 10]).unwrap();
        let iter = LevelOrder::new(&tree, tree.root());
        assert_eq!(values(&tree, iter), vec![50, 30, 70, 20, 40, 60, 80, 10]);
    }

    #[test]
    fn test_level_order_uneven() {
        let tree = Tree::from_values(10, [20, 5, 30, 15, 25]).unwrap();
        let iter = LevelOrder::new(&tree, tree.root());
        assert_eq!(values(&tree, iter), vec![10, 5, 20, 15, 30, 25]);
    }

    #[test]
    fn test_subtree_walk() {
        let tree = Tree::from_values(50, [30, 70, 20, 40]).unwrap();
        let left = tree.find(30).unwrap();
        let iter = LevelOrder::new(&tree, left);
        assert_eq!(values(&tree, iter), vec![30, 20, 40]);
    }

    #[test]
    fn test_exhaustion_and_restart() {
        let tree = Tree::from_values(2, [1, 3]).unwrap();
        let mut iter = LevelOrder::new(&tree, tree.root());

        assert_eq!(iter.by_ref().count(), 3);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        iter.restart();
        assert_eq!(values(&tree, iter), vec![2, 1, 3]);
    }

    #[test]
    fn test_foreign_root() {
        let tree = Tree::from_values(1, []).unwrap();
        let mut iter = LevelOrder::new(&tree, NodeId(7));
        assert_eq!(iter.next(), None);
    }
}
