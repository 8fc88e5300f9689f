pub mod kdtree;

// Re-export the KD-Tree types for convenience.
pub use kdtree::{KdNode, KdTree, KdTreeError, KdTreeResult, NodeId};
