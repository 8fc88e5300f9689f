// src/core/indexing/kdtree/builder.rs

//! Logic for building a balanced KD-Tree from a batch of points.

use std::cmp::Ordering;

use super::error::{KdTreeError, KdTreeResult};
use super::node::{KdNode, NodeId};
use super::tree::KdTree;

/// Point waiting to be placed: its coordinates and optional payload.
type BuildPoint<P> = (Vec<f64>, Option<P>);

impl<P> KdTree<P> {
    /// Builds a balanced KD-Tree from a batch of points.
    ///
    /// At depth `k` the subset is sorted along dimension `k mod D` and its median
    /// becomes the subtree root. The median is shifted left to the first point
    /// sharing its coordinate, so every point equal to the split value ends up in
    /// the right subtree and the lookup rule (`node[d] <= target[d]` goes right)
    /// still finds it.
    ///
    /// # Arguments
    /// * `points` - Points to index. All must have the same, non-zero dimension.
    /// * `payloads` - Optional payloads, parallel to `points`.
    ///
    /// # Errors
    /// `DimensionMismatch` for inconsistent points, `InvalidInput` when the
    /// payload vector is not parallel to the points.
    pub fn balanced(points: Vec<Vec<f64>>, payloads: Option<Vec<P>>) -> KdTreeResult<Self> {
        let mut tree = Self::new();
        let Some(first) = points.first() else {
            return Ok(tree);
        };

        let dimension = first.len();
        if dimension == 0 {
            return Err(KdTreeError::EmptyPoint);
        }
        if let Some(mismatch) = points.iter().find(|p| p.len() != dimension) {
            return Err(KdTreeError::DimensionMismatch { expected: dimension, actual: mismatch.len() });
        }

        let mut build_points: Vec<BuildPoint<P>> = match payloads {
            Some(payloads) => {
                if payloads.len() != points.len() {
                    return Err(KdTreeError::InvalidInput(format!(
                        "{} payloads supplied for {} points",
                        payloads.len(),
                        points.len()
                    )));
                }
                points.into_iter().zip(payloads.into_iter().map(Some)).collect()
            }
            None => points.into_iter().map(|p| (p, None)).collect(),
        };

        tree.dimension = Some(dimension);
        tree.root = tree.build_recursive(&mut build_points, None, 0);
        Ok(tree)
    }

    /// Recursively places the median of `current_build_points` and its two halves.
    fn build_recursive(
        &mut self,
        current_build_points: &mut Vec<BuildPoint<P>>,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Option<NodeId> {
        if current_build_points.is_empty() {
            return None;
        }

        let dimension = current_build_points[0].0.len();
        let axis = depth % dimension;

        current_build_points
            .sort_by(|(a, _), (b, _)| a[axis].partial_cmp(&b[axis]).unwrap_or(Ordering::Equal));

        let split_value = current_build_points[current_build_points.len() / 2].0[axis];
        let median_idx = current_build_points.partition_point(|(p, _)| p[axis] < split_value);

        let mut right_points = current_build_points.split_off(median_idx + 1);
        let (point, payload) = current_build_points.swap_remove(median_idx);
        let mut left_points = std::mem::take(current_build_points);

        let node_id = self.allocate(KdNode::new(point, payload, axis, parent));
        let left = self.build_recursive(&mut left_points, Some(node_id), depth + 1);
        let right = self.build_recursive(&mut right_points, Some(node_id), depth + 1);

        if let Some(node) = self.node_mut(node_id) {
            node.left = left;
            node.right = right;
        }
        Some(node_id)
    }
}
