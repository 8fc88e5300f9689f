// src/core/cluster/cure/engine.rs

//! Agglomerative CURE clustering driven by a KD-Tree of representatives.

use std::collections::HashMap;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::cluster::{ClusterId, CureCluster};
use super::queue::ClusterQueue;
use crate::core::cluster::encoding::{ClusterEncoder, ClusterEncoding};
use crate::core::common::OxiclustError;
use crate::core::config::CureConfig;
use crate::core::indexing::kdtree::KdTree;

/// Outcome of a CURE run, one entry per cluster in every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CureResult {
    /// Indices of the input points that form each cluster.
    pub clusters: Vec<Vec<usize>>,
    /// Shrunk representative points of each cluster.
    pub representors: Vec<Vec<Vec<f64>>>,
    /// Mean of each cluster.
    pub means: Vec<Vec<f64>>,
}

/// CURE clustering engine.
///
/// Owns a copy of the input points and the parameters. `process` runs the
/// algorithm from scratch and keeps only the plain result; the working
/// clusters and their index are dropped when the run ends.
#[derive(Debug, Clone)]
pub struct Cure {
    data: Vec<Vec<f64>>,
    config: CureConfig,
    result: CureResult,
}

impl Cure {
    /// Creates an engine with default representative count and compression.
    ///
    /// # Errors
    /// `InvalidArgument` naming the offending parameter.
    pub fn new(data: Vec<Vec<f64>>, number_cluster: usize) -> Result<Self, OxiclustError> {
        let config = CureConfig { number_cluster, ..CureConfig::default() };
        Self::with_config(data, config)
    }

    /// Creates an engine from explicit parameters.
    ///
    /// # Errors
    /// `InvalidArgument` when the data is empty, ragged or not finite, or when any
    /// parameter of `config` is out of range.
    pub fn with_config(data: Vec<Vec<f64>>, config: CureConfig) -> Result<Self, OxiclustError> {
        validate_data(&data)?;
        config.validate()?;
        Ok(Self { data, config, result: CureResult::default() })
    }

    /// Runs the clustering and returns the result.
    ///
    /// Every call starts over from one cluster per point.
    ///
    /// # Errors
    /// `Internal` if the working state becomes inconsistent, `Index` if the
    /// KD-Tree rejects a point.
    pub fn process(&mut self) -> Result<&CureResult, OxiclustError> {
        info!(
            "CURE: clustering {} points into {} clusters ({} representatives, compression {})",
            self.data.len(),
            self.config.number_cluster,
            self.config.number_represent_points,
            self.config.compression
        );

        let mut state = CureState::new(&self.data, &self.config)?;
        state.run()?;
        self.result = state.into_result();

        info!("CURE: finished with {} clusters", self.result.clusters.len());
        Ok(&self.result)
    }

    /// Member indices per cluster. Empty before `process`.
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.result.clusters
    }

    /// Representative points per cluster. Empty before `process`.
    pub fn representors(&self) -> &[Vec<Vec<f64>>] {
        &self.result.representors
    }

    /// Cluster means. Empty before `process`.
    pub fn means(&self) -> &[Vec<f64>] {
        &self.result.means
    }

    /// Encoding of `clusters`.
    pub const fn cluster_encoding(&self) -> ClusterEncoding {
        ClusterEncoding::IndexListSeparation
    }

    /// One cluster label per input point.
    pub fn labels(&self) -> Result<Vec<Option<usize>>, OxiclustError> {
        Ok(ClusterEncoder::new(&self.result.clusters, &self.data)?.labels())
    }

    pub const fn result(&self) -> &CureResult {
        &self.result
    }

    pub const fn config(&self) -> &CureConfig {
        &self.config
    }

    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }
}

fn validate_data(data: &[Vec<f64>]) -> Result<(), OxiclustError> {
    let Some(first) = data.first() else {
        return Err(OxiclustError::invalid_argument("data", "input data is empty"));
    };

    let dimension = first.len();
    if dimension == 0 {
        return Err(OxiclustError::invalid_argument("data", "points must have at least one coordinate"));
    }

    if let Some((index, point)) = data.iter().enumerate().find(|(_, point)| point.len() != dimension) {
        return Err(OxiclustError::invalid_argument(
            "data",
            format!(
                "point {} has {} coordinates, expected {}",
                index,
                point.len(),
                dimension
            ),
        ));
    }

    if let Some((index, _)) =
        data.iter().enumerate().find(|(_, point)| point.iter().any(|value| !value.is_finite()))
    {
        return Err(OxiclustError::invalid_argument(
            "data",
            format!("point {} has a non-finite coordinate", index),
        ));
    }

    Ok(())
}

/// Cached closest-cluster distance of `id`; unknown ids sort last.
fn cached_distance(clusters: &HashMap<ClusterId, CureCluster>, id: ClusterId) -> f64 {
    clusters.get(&id).map_or(f64::INFINITY, |cluster| cluster.distance)
}

/// Working state of a single run.
struct CureState<'a> {
    data: &'a [Vec<f64>],
    config: &'a CureConfig,
    clusters: HashMap<ClusterId, CureCluster>,
    queue: ClusterQueue,
    tree: KdTree<ClusterId>,
    next_cluster_id: ClusterId,
}

impl<'a> CureState<'a> {
    fn new(data: &'a [Vec<f64>], config: &'a CureConfig) -> Result<Self, OxiclustError> {
        let mut singletons: Vec<CureCluster> = data
            .iter()
            .enumerate()
            .map(|(index, point)| CureCluster::singleton(index, index, point))
            .collect();

        for i in 0..singletons.len() {
            let mut closest = None;
            let mut distance = f64::INFINITY;
            for k in 0..singletons.len() {
                if i == k {
                    continue;
                }
                let candidate = singletons[i].distance_to(&singletons[k]);
                if candidate < distance {
                    closest = Some(singletons[k].id);
                    distance = candidate;
                }
            }
            singletons[i].closest = closest;
            singletons[i].distance = distance;
        }

        let mut points = Vec::with_capacity(singletons.len());
        let mut payloads = Vec::with_capacity(singletons.len());
        for cluster in &singletons {
            for point in &cluster.rep {
                points.push(point.clone());
                payloads.push(cluster.id);
            }
        }
        let tree = KdTree::balanced(points, Some(payloads))?;

        let ids: Vec<ClusterId> = singletons.iter().map(|cluster| cluster.id).collect();
        let next_cluster_id = ids.len();
        let clusters: HashMap<ClusterId, CureCluster> =
            singletons.into_iter().map(|cluster| (cluster.id, cluster)).collect();
        let queue = ClusterQueue::from_ids(ids, |id| cached_distance(&clusters, id));

        Ok(Self { data, config, clusters, queue, tree, next_cluster_id })
    }

    fn run(&mut self) -> Result<(), OxiclustError> {
        while self.queue.len() > self.config.number_cluster {
            self.merge_closest_pair()?;
        }
        Ok(())
    }

    /// Merges the queue head with its closest cluster and repairs the state
    /// around the new cluster. Returns the id of the merged cluster.
    fn merge_closest_pair(&mut self) -> Result<ClusterId, OxiclustError> {
        let cluster1_id = self
            .queue
            .head()
            .ok_or_else(|| OxiclustError::Internal("cluster queue is empty".to_string()))?;
        let cluster2_id = self.cluster(cluster1_id)?.closest.ok_or_else(|| {
            OxiclustError::Internal(format!("cluster {} has no closest cluster", cluster1_id))
        })?;

        if !self.queue.remove(cluster1_id) || !self.queue.remove(cluster2_id) {
            return Err(OxiclustError::Internal(format!(
                "clusters {} and {} are not both queued",
                cluster1_id, cluster2_id
            )));
        }

        let cluster1 = self.take_cluster(cluster1_id)?;
        let cluster2 = self.take_cluster(cluster2_id)?;
        debug!(
            "CURE: merging cluster {} ({} points) with cluster {} ({} points), distance {}",
            cluster1.id,
            cluster1.indexes.len(),
            cluster2.id,
            cluster2.indexes.len(),
            cluster1.distance
        );

        self.remove_representatives(&cluster1)?;
        self.remove_representatives(&cluster2)?;

        let merged_id = self.next_cluster_id;
        self.next_cluster_id += 1;
        let mut merged = CureCluster::merge(
            merged_id,
            &cluster1,
            &cluster2,
            self.data,
            self.config.number_represent_points,
            self.config.compression,
        );

        for point in &merged.rep {
            self.tree.insert(point.clone(), Some(merged_id))?;
        }

        let relocation_requests = self.update_closest(&mut merged, cluster1_id, cluster2_id)?;

        self.clusters.insert(merged_id, merged);
        let clusters = &self.clusters;
        self.queue.insert(merged_id, |id| cached_distance(clusters, id));
        for item_id in relocation_requests {
            self.queue.relocate(item_id, |id| cached_distance(clusters, id));
        }

        Ok(merged_id)
    }

    /// Recomputes `merged.closest` and repairs every queued cluster that
    /// pointed at one of the two merged clusters. Returns the ids whose queue
    /// position must be refreshed.
    fn update_closest(
        &mut self,
        merged: &mut CureCluster,
        cluster1_id: ClusterId,
        cluster2_id: ClusterId,
    ) -> Result<Vec<ClusterId>, OxiclustError> {
        let Some(head_id) = self.queue.head() else {
            return Ok(Vec::new());
        };

        merged.closest = Some(head_id);
        merged.distance = merged.distance_to(self.cluster(head_id)?);

        let mut updates = Vec::new();
        for item_id in self.queue.iter() {
            let item = self.cluster(item_id)?;
            let distance = merged.distance_to(item);

            if distance < merged.distance {
                merged.closest = Some(item_id);
                merged.distance = distance;
            }

            if item.closest == Some(cluster1_id) || item.closest == Some(cluster2_id) {
                let (closest, closest_distance) = if item.distance < distance {
                    self.closest_cluster(item, distance)?.unwrap_or((merged.id, distance))
                } else {
                    (merged.id, distance)
                };
                updates.push((item_id, closest, closest_distance));
            }
        }

        let mut relocation_requests = Vec::with_capacity(updates.len());
        for (item_id, closest, distance) in updates {
            let item = self
                .clusters
                .get_mut(&item_id)
                .ok_or_else(|| OxiclustError::Internal(format!("cluster {} is missing", item_id)))?;
            item.closest = Some(closest);
            item.distance = distance;
            relocation_requests.push(item_id);
        }

        Ok(relocation_requests)
    }

    /// Searches the index around `cluster`'s representatives for the nearest
    /// representative of another cluster within `sqrt(distance)`.
    fn closest_cluster(
        &self,
        cluster: &CureCluster,
        distance: f64,
    ) -> Result<Option<(ClusterId, f64)>, OxiclustError> {
        let radius = distance.sqrt();
        let mut nearest_cluster = None;
        let mut nearest_distance = f64::INFINITY;

        for point in &cluster.rep {
            for (candidate_distance, node_id) in self.tree.find_nearest_dist_nodes(point, radius)? {
                let Some(&payload) = self.tree.node(node_id).and_then(|node| node.payload()) else {
                    continue;
                };
                if candidate_distance < nearest_distance && payload != cluster.id {
                    nearest_cluster = Some(payload);
                    nearest_distance = candidate_distance;
                }
            }
        }

        trace!(
            "CURE: index rescan for cluster {} within {} found {:?}",
            cluster.id,
            radius,
            nearest_cluster
        );
        Ok(nearest_cluster.map(|id| (id, nearest_distance)))
    }

    fn remove_representatives(&mut self, cluster: &CureCluster) -> Result<(), OxiclustError> {
        for point in &cluster.rep {
            if !self.tree.remove_with_payload(point, &cluster.id) {
                return Err(OxiclustError::Internal(format!(
                    "representative {:?} of cluster {} is not indexed",
                    point, cluster.id
                )));
            }
        }
        Ok(())
    }

    fn cluster(&self, id: ClusterId) -> Result<&CureCluster, OxiclustError> {
        self.clusters
            .get(&id)
            .ok_or_else(|| OxiclustError::Internal(format!("cluster {} is missing", id)))
    }

    fn take_cluster(&mut self, id: ClusterId) -> Result<CureCluster, OxiclustError> {
        self.clusters
            .remove(&id)
            .ok_or_else(|| OxiclustError::Internal(format!("cluster {} is missing", id)))
    }

    fn into_result(self) -> CureResult {
        let mut result = CureResult::default();
        for id in self.queue.iter() {
            if let Some(cluster) = self.clusters.get(&id) {
                result.clusters.push(cluster.indexes.clone());
                result.representors.push(cluster.rep.clone());
                result.means.push(cluster.mean.clone());
            }
        }
        result
    }
}
