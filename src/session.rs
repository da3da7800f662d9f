use anyhow::Result;

use crate::annotated::Annotated;
use crate::config::TreeConfig;
use crate::error::SessionError;
use crate::node::Side;
use crate::tree::Tree;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Unbalanced,
    Balanced,
}

/// One user rebalancing a tree by hand. New nodes are only offered once the tree is balanced.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    tree: Tree,
    size: usize,
    config: TreeConfig,
    generation: u64,
}

impl Session {
    pub fn new(size: usize, config: TreeConfig) -> Result<Self> {
        let tree = Tree::with_config(size, config.clone())?;

        Ok(Self::with_tree(tree, size, config))
    }

    fn with_tree(tree: Tree, size: usize, config: TreeConfig) -> Self {
        let mut session = Self {
            state: SessionState::Unbalanced,
            tree,
            size,
            config,
            generation: 0,
        };
        session.refresh_state();

        session
    }

    pub fn get_state(&self) -> SessionState {
        self.state
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn annotated(&mut self) -> Annotated<'_> {
        self.tree.update_nodes()
    }

    /// Rotates the node holding `value`; returns the value that took its place.
    pub fn rotate(&mut self, value: i32, direction: Side) -> Result<i32> {
        let pivot = self.tree.find(value).ok_or(SessionError::NodeNotFound(value))?;

        let lifted = match direction {
            Side::Left => self.tree.rotate_left(pivot)?,
            Side::Right => self.tree.rotate_right(pivot)?,
        };
        let lifted = self.tree.get(lifted)?.value();

        self.refresh_state();

        Ok(lifted)
    }

    pub fn add_node(&mut self) -> Result<i32> {
        let id = self.tree.add_random_node()?;
        let value = self.tree.get(id)?.value();

        log::debug!("added node {}", value);
        self.refresh_state();

        Ok(value)
    }

    /// Replaces the tree with a fresh one of the initial size.
    pub fn reset(&mut self) -> Result<()> {
        self.generation += 1;

        let mut config = self.config.clone();
        // a seeded session stays reproducible without rebuilding the same tree every time
        config.seed = config.seed.map(|seed| seed.wrapping_add(self.generation));

        self.tree = Tree::with_config(self.size, config)?;
        self.refresh_state();

        Ok(())
    }

    fn refresh_state(&mut self) {
        let state = if self.tree.update_nodes().is_balanced() {
            SessionState::Balanced
        } else {
            SessionState::Unbalanced
        };

        if state != self.state {
            log::debug!("session state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }
}
