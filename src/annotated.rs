use crate::error::TreeError;
use crate::level_order::LevelOrder;
use crate::node::{Annotation, NodeId};
use crate::snapshot::{NodeSnapshot, Snapshot};
use crate::tree::Tree;

/// Read access to a tree whose annotations are current.
///
/// Holding one borrows the tree, so it can't be reshaped until the view is dropped.
#[derive(Debug, Clone, Copy)]
pub struct Annotated<'a> {
    tree: &'a Tree,
}

impl<'a> Annotated<'a> {
    pub(crate) fn new(tree: &'a Tree) -> Self {
        debug_assert!(!tree.is_dirty());
        Self { tree }
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn get(&self, id: NodeId) -> Result<Annotation, TreeError> {
        Ok(self.tree.get(id)?.annotation)
    }

    pub fn level_order(&self) -> LevelOrder<'a> {
        self.tree.level_order()
    }

    /// Every node's balance factor is within `[-1, 1]`.
    pub fn is_balanced(&self) -> bool {
        self.unbalanced().next().is_none()
    }

    /// Nodes outside the AVL range, in level order.
    pub fn unbalanced(&self) -> impl Iterator<Item = NodeId> + 'a {
        let tree = self.tree;
        tree.level_order()
            .filter(move |&id| tree.node(id).annotation.balance_factor.abs() > 1)
    }

    pub fn snapshot(&self) -> Snapshot {
        let tree = self.tree;
        let value_of = |id: Option<NodeId>| id.map(|id| tree.node(id).value());

        let nodes = tree
            .level_order()
            .map(|id| {
                let node = tree.node(id);
                NodeSnapshot {
                    value: node.value(),
                    parent: value_of(node.parent()),
                    left: value_of(node.left()),
                    right: value_of(node.right()),
                    annotation: node.annotation,
                }
            })
            .collect();

        Snapshot {
            balanced: self.is_balanced(),
            nodes,
        }
    }
}
