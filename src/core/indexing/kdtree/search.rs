// src/core/indexing/kdtree/search.rs

//! Exact-match lookup and radius-bounded neighbor search.

use std::cmp::Ordering;

use super::error::{KdTreeError, KdTreeResult};
use super::node::{KdNode, NodeId};
use super::tree::KdTree;
use crate::core::vector::distance::euclidean_distance_square;

impl<P> KdTree<P> {
    /// Finds a node holding exactly `point`.
    ///
    /// The walk starts at `start` (the root when `None`). A point of the wrong
    /// dimension cannot be stored in the tree and is reported as not found.
    pub fn find_node(&self, point: &[f64], start: Option<NodeId>) -> Option<NodeId> {
        self.find_node_by_rule(point, start, |node| node.point == point)
    }

    /// Finds a node holding exactly `point` whose payload equals `payload`.
    ///
    /// Needed whenever several nodes share coordinates and only one of them
    /// should be addressed, e.g. representatives of different clusters.
    pub fn find_node_with_payload(
        &self,
        point: &[f64],
        payload: &P,
        start: Option<NodeId>,
    ) -> Option<NodeId>
    where
        P: PartialEq,
    {
        self.find_node_by_rule(point, start, |node| {
            node.point == point && node.payload.as_ref() == Some(payload)
        })
    }

    /// Descends along the only path where `point` can live.
    ///
    /// A node is tested only when `node[disc] <= point[disc]`: an equal point is
    /// always stored on the right of a node with the same split value, so nodes
    /// whose split value exceeds the target are skipped and the walk goes left.
    fn find_node_by_rule<F>(&self, point: &[f64], start: Option<NodeId>, rule: F) -> Option<NodeId>
    where
        F: Fn(&KdNode<P>) -> bool,
    {
        if self.dimension != Some(point.len()) {
            return None;
        }

        let mut current = start.or(self.root);
        while let Some(node_id) = current {
            let node = self.nodes.get(&node_id)?;
            if node.split_value() <= point[node.disc] {
                if rule(node) {
                    return Some(node_id);
                }
                current = node.right;
            } else {
                current = node.left;
            }
        }
        None
    }

    /// Finds every node within `distance` of `point`.
    ///
    /// Returns `(squared_distance, node_id)` pairs; empty when nothing lies
    /// within the radius or the tree is empty. Matches come in post-order
    /// (right subtree, left subtree, node), so callers that keep the first
    /// strict minimum break ties the same way on every run.
    ///
    /// # Errors
    /// `DimensionMismatch` when the query does not match the tree dimension.
    pub fn find_nearest_dist_nodes(
        &self,
        point: &[f64],
        distance: f64,
    ) -> KdTreeResult<Vec<(f64, NodeId)>> {
        let Some(root) = self.root else {
            return Ok(Vec::new());
        };
        self.check_query(point)?;

        let distance_square = distance * distance;
        let mut best_nodes = Vec::new();
        // (node, children already scheduled)
        let mut pending = vec![(root, false)];

        while let Some((node_id, expanded)) = pending.pop() {
            let Some(node) = self.nodes.get(&node_id) else {
                continue;
            };

            if expanded {
                let candidate_distance = euclidean_distance_square(point, &node.point);
                if candidate_distance <= distance_square {
                    best_nodes.push((candidate_distance, node_id));
                }
                continue;
            }

            pending.push((node_id, true));

            let split_value = node.split_value();
            let query_coord = point[node.disc];

            if let Some(left) = node.left {
                if query_coord < split_value + distance {
                    pending.push((left, false));
                }
            }
            if let Some(right) = node.right {
                if query_coord >= split_value - distance {
                    pending.push((right, false));
                }
            }
        }

        Ok(best_nodes)
    }

    /// Finds the closest node within `distance` of `point`.
    ///
    /// Returns the squared distance together with the node id, or `None` when
    /// no node lies within the radius.
    pub fn find_nearest_dist_node(
        &self,
        point: &[f64],
        distance: f64,
    ) -> KdTreeResult<Option<(f64, NodeId)>> {
        let best_nodes = self.find_nearest_dist_nodes(point, distance)?;
        Ok(best_nodes
            .into_iter()
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)))
    }

    fn check_query(&self, point: &[f64]) -> KdTreeResult<()> {
        match self.dimension {
            Some(expected) if expected != point.len() => {
                Err(KdTreeError::DimensionMismatch { expected, actual: point.len() })
            }
            _ => Ok(()),
        }
    }
}
