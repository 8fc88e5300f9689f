// src/core/cluster/cure/cluster.rs

use crate::core::vector::distance::{euclidean_distance_square, min_pairwise_distance_square};

/// Cluster identifier type. A merge always mints a new id.
pub type ClusterId = usize;

/// A live cluster of the CURE engine.
///
/// Members are indices into the engine's input points. `closest` is a plain
/// id of another live cluster, `distance` the cached squared distance to it
/// (`f64::INFINITY` while there is no other cluster).
#[derive(Debug, Clone, PartialEq)]
pub struct CureCluster {
    pub(super) id: ClusterId,
    pub(super) indexes: Vec<usize>,
    pub(super) mean: Vec<f64>,
    pub(super) rep: Vec<Vec<f64>>,
    pub(super) closest: Option<ClusterId>,
    pub(super) distance: f64,
}

impl CureCluster {
    /// Creates the one-point cluster the engine starts from.
    pub fn singleton(id: ClusterId, index: usize, point: &[f64]) -> Self {
        Self {
            id,
            indexes: vec![index],
            mean: point.to_vec(),
            rep: vec![point.to_vec()],
            closest: None,
            distance: f64::INFINITY,
        }
    }

    /// Builds a new cluster owning the members of both parents.
    ///
    /// The mean is the member-count weighted average of the parents' means,
    /// except when every member point is identical: then it is that point,
    /// copied, so no rounding creeps in. Representatives are chosen by
    /// farthest-point selection and shrunk toward the mean by `compression`.
    pub fn merge(
        id: ClusterId,
        cluster1: &Self,
        cluster2: &Self,
        data: &[Vec<f64>],
        number_represent_points: usize,
        compression: f64,
    ) -> Self {
        let indexes: Vec<usize> =
            cluster1.indexes.iter().chain(cluster2.indexes.iter()).copied().collect();

        let first = &data[indexes[0]];
        let mean = if indexes.iter().all(|&index| data[index] == *first) {
            first.clone()
        } else {
            let size1 = cluster1.indexes.len() as f64;
            let size2 = cluster2.indexes.len() as f64;
            cluster1
                .mean
                .iter()
                .zip(cluster2.mean.iter())
                .map(|(m1, m2)| (size1 * m1 + size2 * m2) / (size1 + size2))
                .collect()
        };

        let rep = select_representatives(data, &indexes, &mean, number_represent_points)
            .into_iter()
            .map(|point| shrink(point, &mean, compression))
            .collect();

        Self { id, indexes, mean, rep, closest: None, distance: f64::INFINITY }
    }

    /// Minimum squared distance between the representatives of both clusters.
    pub fn distance_to(&self, other: &Self) -> f64 {
        min_pairwise_distance_square(&self.rep, &other.rep)
    }

    pub const fn id(&self) -> ClusterId {
        self.id
    }

    /// Indices of the member points.
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Representative points, already shrunk toward the mean.
    pub fn representatives(&self) -> &[Vec<f64>] {
        &self.rep
    }

    pub const fn closest(&self) -> Option<ClusterId> {
        self.closest
    }

    pub const fn distance(&self) -> f64 {
        self.distance
    }
}

/// Greedy farthest-point selection of up to `count` well-scattered members.
///
/// The first pick maximizes the distance to `mean`; each later pick maximizes
/// the minimum distance to the points picked so far. Among equal scores the
/// last member scanned wins. Selection stops once no member adds a new point.
pub(super) fn select_representatives(
    data: &[Vec<f64>],
    indexes: &[usize],
    mean: &[f64],
    count: usize,
) -> Vec<Vec<f64>> {
    let mut selected: Vec<&Vec<f64>> = Vec::with_capacity(count);

    for round in 0..count {
        let mut maximal_distance = 0.0;
        let mut maximal_point = None;

        for &index in indexes {
            let point = &data[index];
            let minimal_distance = if round == 0 {
                euclidean_distance_square(point, mean)
            } else {
                selected
                    .iter()
                    .map(|chosen| euclidean_distance_square(point, chosen))
                    .fold(f64::INFINITY, f64::min)
            };

            if minimal_distance >= maximal_distance {
                maximal_distance = minimal_distance;
                maximal_point = Some(point);
            }
        }

        match maximal_point {
            Some(point) if !selected.contains(&point) => selected.push(point),
            _ => break,
        }
    }

    selected.into_iter().cloned().collect()
}

/// Moves `point` toward `mean`: `point + compression * (mean - point)`.
///
/// Written as a convex combination so that `compression = 0` keeps the point
/// and `compression = 1` lands exactly on the mean.
pub(super) fn shrink(point: Vec<f64>, mean: &[f64], compression: f64) -> Vec<f64> {
    point
        .into_iter()
        .zip(mean.iter())
        .map(|(p, m)| p * (1.0 - compression) + m * compression)
        .collect()
}
