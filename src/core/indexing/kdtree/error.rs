// src/core/indexing/kdtree/error.rs

use std::fmt;

/// Custom error types for KD-Tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum KdTreeError {
    /// A point does not have the dimension the tree was fixed to.
    DimensionMismatch { expected: usize, actual: usize },
    /// Zero-length points cannot be indexed.
    EmptyPoint,
    /// Malformed construction input, e.g. payloads not parallel to points.
    InvalidInput(String),
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "KD-Tree Dimension Mismatch: expected {expected}, got {actual}")
            }
            Self::EmptyPoint => write!(f, "KD-Tree Empty Point: points must have at least one coordinate"),
            Self::InvalidInput(msg) => write!(f, "KD-Tree Invalid Input: {msg}"),
        }
    }
}

impl std::error::Error for KdTreeError {}

/// Result type alias for convenience
pub type KdTreeResult<T> = Result<T, KdTreeError>;
