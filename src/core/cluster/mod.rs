// src/core/cluster/mod.rs

pub mod cure;
pub mod encoding;

pub use cure::{Cure, CureResult};
pub use encoding::{ClusterEncoder, ClusterEncoding};
