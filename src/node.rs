use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Handle of a node inside the [`Tree`](crate::tree::Tree) arena that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Values derived from the tree shape. Only valid right after a recomputation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Annotation {
    pub height: usize,
    pub balance_factor: i32,
    /// Level-order layout key: root 0, children `2i + 1` and `2i + 2`. Saturates at
    /// `u64::MAX` from depth 64 on, where the rule no longer holds.
    pub position_id: u64,
    /// Balance factor mapped to `[-1, 1]` for renderers; 0 for AVL-admissible nodes.
    pub skew: f64,
}

impl Default for Annotation {
    fn default() -> Self {
        Self {
            height: 1,
            balance_factor: 0,
            position_id: 0,
            skew: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    value: i32,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) annotation: Annotation,
}

impl Node {
    pub(crate) fn new(value: i32) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
            annotation: Annotation::default(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn compare(&self, other: &Node) -> Ordering {
        self.value.cmp(&other.value)
    }

    /// Children heights must already be current; an absent child counts as 0.
    pub(crate) fn recompute_height_and_balance(&mut self, left_height: usize, right_height: usize) {
        self.annotation.height = 1 + left_height.max(right_height);
        self.annotation.balance_factor = right_height as i32 - left_height as i32;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
