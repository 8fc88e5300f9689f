// src/core/vector/distance.rs

/// Calculates the squared Euclidean distance between two points.
///
/// Callers guarantee equal dimensions; extra coordinates of the longer slice
/// are ignored.
pub fn euclidean_distance_square(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Calculates the Euclidean distance between two points.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    euclidean_distance_square(a, b).sqrt()
}

/// Minimum squared distance between any point of `a` and any point of `b`.
///
/// Returns `f64::INFINITY` when either set is empty.
pub fn min_pairwise_distance_square(a: &[Vec<f64>], b: &[Vec<f64>]) -> f64 {
    a.iter()
        .flat_map(|p| b.iter().map(move |q| euclidean_distance_square(p, q)))
        .fold(f64::INFINITY, f64::min)
}
