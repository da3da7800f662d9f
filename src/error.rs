use thiserror::Error;

use crate::node::{NodeId, Side};

#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("can't rotate {side} around {pivot}: no {child} child")]
    RotationPrecondition { pivot: i32, side: Side, child: Side },
    #[error("{0} is already in the tree")]
    DuplicateValueInsert(i32),
    #[error("value space exhausted: requested {requested} unique values, only {available} available")]
    ValueSpaceExhausted { requested: usize, available: usize },
    #[error("invalid node {0}")]
    InvalidNode(NodeId),
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid command")]
    InvalidCommand,
    #[error("invalid value")]
    InvalidValue,
    #[error("node {0} not found")]
    NodeNotFound(i32),
    #[error("tree is not balanced yet")]
    TreeUnbalanced,
}
