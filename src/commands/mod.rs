pub mod help;
pub mod rotate;
pub mod tree;
