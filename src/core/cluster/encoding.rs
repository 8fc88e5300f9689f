// src/core/cluster/encoding.rs

//! Conversions between the representations of a clustering result.

use serde::{Deserialize, Serialize};

use crate::core::common::OxiclustError;

/// How a clustering result is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterEncoding {
    /// One list of point indices per cluster.
    IndexListSeparation,
    /// One cluster label per input point.
    IndexLabeling,
    /// One list of points (coordinates) per cluster.
    ObjectListSeparation,
}

/// Re-encodes index-list clusters over a data set.
#[derive(Debug, Clone)]
pub struct ClusterEncoder<'a> {
    clusters: &'a [Vec<usize>],
    data: &'a [Vec<f64>],
}

impl<'a> ClusterEncoder<'a> {
    /// Wraps `clusters` (index lists into `data`).
    ///
    /// # Errors
    /// `InvalidArgument` when an index does not address a point of `data`.
    pub fn new(clusters: &'a [Vec<usize>], data: &'a [Vec<f64>]) -> Result<Self, OxiclustError> {
        if let Some(index) = clusters.iter().flatten().find(|&&index| index >= data.len()) {
            return Err(OxiclustError::invalid_argument(
                "clusters",
                format!("index {} is out of range for {} points", index, data.len()),
            ));
        }
        Ok(Self { clusters, data })
    }

    /// Encoding of the wrapped clusters.
    pub const fn encoding(&self) -> ClusterEncoding {
        ClusterEncoding::IndexListSeparation
    }

    /// One label per point: the position of its cluster, `None` when no
    /// cluster contains the point.
    pub fn labels(&self) -> Vec<Option<usize>> {
        let mut labels = vec![None; self.data.len()];
        for (label, cluster) in self.clusters.iter().enumerate() {
            for &index in cluster {
                labels[index] = Some(label);
            }
        }
        labels
    }

    /// Copies of the member points, grouped per cluster.
    pub fn object_lists(&self) -> Vec<Vec<Vec<f64>>> {
        self.clusters
            .iter()
            .map(|cluster| cluster.iter().map(|&index| self.data[index].clone()).collect())
            .collect()
    }

    /// Rebuilds index lists from a label vector. Clusters are ordered by label
    /// and indices within a cluster ascend; unlabeled points are left out.
    pub fn index_lists_from_labels(labels: &[Option<usize>]) -> Vec<Vec<usize>> {
        let cluster_count = labels.iter().flatten().max().map_or(0, |max| max + 1);
        let mut clusters = vec![Vec::new(); cluster_count];
        for (index, label) in labels.iter().enumerate() {
            if let Some(label) = label {
                clusters[*label].push(index);
            }
        }
        clusters.retain(|cluster| !cluster.is_empty());
        clusters
    }
}
