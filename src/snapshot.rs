use serde::Serialize;

use crate::node::Annotation;

/// Level-order dump of an annotated tree, for renderers living outside this crate.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub balanced: bool,
    pub nodes: Vec<NodeSnapshot>,
}

/// Links are given as node values, which are unique within a tree.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub value: i32,
    pub parent: Option<i32>,
    pub left: Option<i32>,
    pub right: Option<i32>,
    #[serde(flatten)]
    pub annotation: Annotation,
}
