// src/core/cluster/cure/mod.rs

//! CURE (Clustering Using REpresentatives) hierarchical clustering.
//!
//! Every point starts as its own cluster. The two clusters whose
//! representatives lie closest are merged until the requested number of
//! clusters remains. Each cluster is summarized by a few well-scattered
//! member points shrunk toward its mean, and a KD-Tree over those
//! representatives answers the neighbor queries of the merge loop.

pub mod cluster;
pub mod engine;
pub mod queue;

pub use cluster::{ClusterId, CureCluster};
pub use engine::{Cure, CureResult};
pub use queue::ClusterQueue;

#[cfg(test)]
mod tests;
