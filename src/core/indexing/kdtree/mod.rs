// src/core/indexing/kdtree/mod.rs

//! Dynamic KD-Tree spatial index.
//!
//! Stores N-dimensional `f64` points with optional payloads and supports:
//! - balanced bulk construction ([`KdTree::balanced`])
//! - dynamic insertion and removal, optionally qualified by payload
//! - exact point lookup
//! - radius-bounded neighbor search
//!
//! The tree never rebalances; adversarial insertion orders degrade to O(n) depth.

mod builder;
mod error;
mod node;
mod remove;
mod search;
mod tree;

pub use self::error::{KdTreeError, KdTreeResult};
pub use self::node::{KdNode, NodeId};
pub use self::tree::{Iter, KdTree};

#[cfg(test)]
mod tests;
