use std::cmp::Ordering;
use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::annotated::Annotated;
use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::level_order::LevelOrder;
use crate::node::{Node, NodeId, Side};

type Result<T> = std::result::Result<T, TreeError>;

// after this many collisions we stop guessing and pick among the free values directly
const MAX_REJECTION_DRAWS: usize = 32;

/// Binary search tree of unique integers.
///
/// Height, balance factor and position id are maintained lazily: any shape change marks the
/// tree dirty, and they are only readable through the [`Annotated`] view returned by
/// [`Tree::update_nodes`].
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    known_values: BTreeSet<i32>,
    // how many of known_values fall inside config.value_space
    in_space: usize,
    dirty: bool,
    config: TreeConfig,
    rng: StdRng,
}

impl Tree {
    /// Builds a tree of `size` unique random values from the default value space.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_config(size, TreeConfig::default())
    }

    /// A size of 0 still builds a single node: the tree is never empty.
    pub fn with_config(size: usize, config: TreeConfig) -> Result<Self> {
        let size = size.max(1);
        let capacity = config.value_space.capacity();
        if size > capacity {
            return Err(TreeError::ValueSpaceExhausted {
                requested: size,
                available: capacity,
            });
        }

        let mut tree = Self::empty(config);
        let value = tree.generate_value()?;
        tree.push_node(value);

        while tree.len() < size {
            let value = tree.generate_value()?;
            tree.insert(value)?;
        }

        log::debug!("built tree of {} nodes in {:?}", tree.len(), tree.config.value_space.range());
        tree.update_nodes();

        Ok(tree)
    }

    /// Builds a tree by inserting `values` in order under `root`, with the default config.
    pub fn from_values<I>(root: i32, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut tree = Self::empty(TreeConfig::default());
        tree.push_node(root);

        for value in values {
            tree.insert(value)?;
        }

        Ok(tree)
    }

    // callers push the root node before handing the tree out
    fn empty(config: TreeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            nodes: Vec::new(),
            root: NodeId(0),
            known_values: BTreeSet::new(),
            in_space: 0,
            dirty: true,
            config,
            rng,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn all_values(&self) -> &BTreeSet<i32> {
        &self.known_values
    }

    pub fn contains(&self, value: i32) -> bool {
        self.known_values.contains(&value)
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(TreeError::InvalidNode(id))
    }

    /// Ids handed out by this tree are always in range.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn find(&self, value: i32) -> Option<NodeId> {
        let mut current = Some(self.root);

        while let Some(id) = current {
            let node = self.node(id);
            current = match value.cmp(&node.value()) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    pub fn level_order(&self) -> LevelOrder<'_> {
        LevelOrder::new(self, self.root)
    }

    /// Walks the tree structure in ascending value order.
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder {
            tree: self,
            stack: Vec::new(),
            current: Some(self.root),
        }
    }

    /// Current annotations, or `None` if the shape changed since the last [`Tree::update_nodes`].
    pub fn annotated(&self) -> Option<Annotated<'_>> {
        if self.dirty {
            return None;
        }

        Some(Annotated::new(self))
    }

    /// Places a new node holding `value` by BST descent from the root.
    pub fn insert(&mut self, value: i32) -> Result<NodeId> {
        if self.contains(value) {
            return Err(TreeError::DuplicateValueInsert(value));
        }

        let id = self.push_node(value);
        let mut current = self.root;

        loop {
            let side = match value.cmp(&self.node(current).value()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                // known_values mirrors the arena, so an equal value was rejected above
                Ordering::Equal => unreachable!("duplicate value {value} slipped into the tree"),
            };

            match self.node(current).child(side) {
                Some(child) => current = child,
                None => {
                    self.set_child(current, side, Some(id));
                    break;
                }
            }
        }

        log::trace!("inserted {} under {}", value, self.node(current).value());
        self.dirty = true;

        Ok(id)
    }

    /// Inserts a fresh random value from the configured value space and refreshes annotations.
    pub fn add_random_node(&mut self) -> Result<NodeId> {
        let value = self.generate_value()?;
        let id = self.insert(value)?;
        self.update_nodes();

        Ok(id)
    }

    /// Rotates `pivot` down to the left; its right child takes its place. Returns that child.
    pub fn rotate_left(&mut self, pivot: NodeId) -> Result<NodeId> {
        self.rotate(pivot, Side::Left)
    }

    /// Rotates `pivot` down to the right; its left child takes its place. Returns that child.
    pub fn rotate_right(&mut self, pivot: NodeId) -> Result<NodeId> {
        self.rotate(pivot, Side::Right)
    }

    fn rotate(&mut self, pivot: NodeId, direction: Side) -> Result<NodeId> {
        let pivot_node = self.get(pivot)?;
        let lifted_side = direction.opposite();

        // all checks happen before the first write so a failed rotation leaves no trace
        let lifted = pivot_node.child(lifted_side).ok_or(TreeError::RotationPrecondition {
            pivot: pivot_node.value(),
            side: direction,
            child: lifted_side,
        })?;
        let grandparent = pivot_node.parent();
        let inner = self.node(lifted).child(direction);

        self.set_child(pivot, lifted_side, inner);

        match grandparent {
            Some(grandparent) => {
                let side = if self.node(grandparent).left() == Some(pivot) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.set_child(grandparent, side, Some(lifted));
            }
            None => {
                self.root = lifted;
                self.node_mut(lifted).parent = None;
            }
        }

        self.set_child(lifted, direction, Some(pivot));
        self.dirty = true;

        log::trace!(
            "rotated {} {}, new subtree root {}",
            self.node(pivot).value(),
            direction,
            self.node(lifted).value()
        );

        Ok(lifted)
    }

    /// Recomputes position ids, heights, balance factors and skew if the shape changed.
    pub fn update_nodes(&mut self) -> Annotated<'_> {
        if self.dirty {
            self.recompute();
            self.dirty = false;
        }

        Annotated::new(self)
    }

    fn recompute(&mut self) {
        let order: Vec<NodeId> = self.level_order().collect();

        self.node_mut(self.root).annotation.position_id = 0;
        for &id in &order {
            let node = self.node(id);
            let position_id = node.annotation.position_id;

            for (side, child) in [(Side::Left, node.left()), (Side::Right, node.right())] {
                if let Some(child) = child {
                    self.node_mut(child).annotation.position_id = child_position_id(position_id, side);
                }
            }
        }

        // children before parents
        let half = self.len() / 2;
        for &id in order.iter().rev() {
            let node = self.node(id);
            let left_height = self.height_of(node.left());
            let right_height = self.height_of(node.right());

            let node = self.node_mut(id);
            node.recompute_height_and_balance(left_height, right_height);
            node.annotation.skew = skew(node.annotation.balance_factor, half);
        }

        log::debug!(
            "recomputed {} nodes, root height {}",
            order.len(),
            self.node(self.root).annotation.height
        );
    }

    fn height_of(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).annotation.height)
    }

    /// Doesn't detach whatever `child` was linked to before; callers keep both ends consistent.
    pub(crate) fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        *self.node_mut(parent).child_mut(side) = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }
    }

    fn push_node(&mut self, value: i32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(value));
        self.known_values.insert(value);
        if self.config.value_space.contains(value) {
            self.in_space += 1;
        }
        self.dirty = true;
        id
    }

    fn generate_value(&mut self) -> Result<i32> {
        let space = self.config.value_space;
        let taken = self.in_space;
        let capacity = space.capacity();

        if taken >= capacity {
            return Err(TreeError::ValueSpaceExhausted {
                requested: taken + 1,
                available: capacity,
            });
        }

        for _ in 0..MAX_REJECTION_DRAWS {
            let value = self.rng.gen_range(space.range());
            if !self.known_values.contains(&value) {
                return Ok(value);
            }
        }

        log::trace!("value space {:?} is crowded, picking among free values", space.range());

        let nth = self.rng.gen_range(0..capacity - taken);
        space
            .range()
            .filter(|value| !self.known_values.contains(value))
            .nth(nth)
            .ok_or(TreeError::ValueSpaceExhausted {
                requested: taken + 1,
                available: capacity,
            })
    }
}

fn child_position_id(parent: u64, side: Side) -> u64 {
    let offset = match side {
        Side::Left => 1,
        Side::Right => 2,
    };

    let id = parent.saturating_mul(2).saturating_add(offset);
    if id == u64::MAX {
        log::debug!("position id of a {} child of {} saturated", side, parent);
    }

    id
}

fn skew(balance_factor: i32, half: usize) -> f64 {
    if balance_factor.abs() <= 1 || half == 0 {
        return 0.0;
    }

    (balance_factor as f64 / half as f64).clamp(-1.0, 1.0)
}

pub struct InOrder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl Iterator for InOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        // descend the leftmost path first
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.tree.node(id).left();
        }

        let id = self.stack.pop()?;
        self.current = self.tree.node(id).right();

        Some(id)
    }
}
