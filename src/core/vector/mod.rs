// src/core/vector/mod.rs

//! Point arithmetic shared by the index and the clustering engines.

pub mod distance;

pub use distance::{euclidean_distance, euclidean_distance_square, min_pairwise_distance_square};
