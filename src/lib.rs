//! Binary search tree of unique integers meant to be rebalanced by hand.
//!
//! The [`Tree`] never balances itself. Callers rotate nodes explicitly and read heights, balance
//! factors and layout ids through [`Tree::update_nodes`], which recomputes them lazily.

pub mod annotated;
pub mod commands;
pub mod config;
pub mod error;
pub mod fsm;
pub mod level_order;
pub mod node;
pub mod printer;
pub mod session;
pub mod snapshot;
pub mod tree;

pub use annotated::Annotated;
pub use config::{TreeConfig, ValueSpace};
pub use error::{SessionError, TreeError};
pub use level_order::LevelOrder;
pub use node::{Annotation, Node, NodeId, Side};
pub use tree::Tree;
