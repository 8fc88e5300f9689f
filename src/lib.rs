#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

//! # Oxiclust: CURE clustering over a dynamic KD-Tree
//!
//! `oxiclust` provides two building blocks:
//! - `KdTree`, a k-dimensional tree with balanced bulk construction, dynamic
//!   insertion, payload-qualified exact lookup and removal, and radius search
//! - `Cure`, the CURE hierarchical clustering engine, which keeps a KD-Tree of
//!   cluster representatives to answer its nearest-neighbor queries
//!
//! ```
//! use oxiclust::Cure;
//!
//! let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
//! let mut cure = Cure::new(data, 2)?;
//! cure.process()?;
//! assert_eq!(cure.clusters().len(), 2);
//! # Ok::<(), oxiclust::OxiclustError>(())
//! ```

pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::core::cluster::{ClusterEncoder, ClusterEncoding, Cure, CureResult};
pub use crate::core::common::OxiclustError;
pub use crate::core::config::{CureConfig, CureConfigBuilder};
pub use crate::core::indexing::kdtree::{KdNode, KdTree, KdTreeError, NodeId};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, OxiclustError>;
