// src/core/cluster/cure/queue.rs

use super::cluster::ClusterId;

/// Live clusters ordered by ascending distance to their closest cluster.
///
/// The queue stores ids only; distances are read through the lookup passed to
/// each ordering operation so that they always reflect the current state of the
/// clusters. Clusters with equal distances keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct ClusterQueue {
    order: Vec<ClusterId>,
}

impl ClusterQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a queue from `ids`, stably sorted by `distance_of`.
    pub fn from_ids<F>(ids: Vec<ClusterId>, distance_of: F) -> Self
    where
        F: Fn(ClusterId) -> f64,
    {
        let mut order = ids;
        order.sort_by(|a, b| distance_of(*a).total_cmp(&distance_of(*b)));
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The cluster with the smallest distance.
    pub fn head(&self) -> Option<ClusterId> {
        self.order.first().copied()
    }

    /// Iterates the ids from the head of the queue.
    pub fn iter(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.order.iter().copied()
    }

    pub fn contains(&self, id: ClusterId) -> bool {
        self.order.contains(&id)
    }

    /// Removes `id` and reports whether it was queued.
    pub fn remove(&mut self, id: ClusterId) -> bool {
        match self.order.iter().position(|&queued| queued == id) {
            Some(position) => {
                self.order.remove(position);
                true
            }
            None => false,
        }
    }

    /// Inserts `id` before the first cluster with a strictly greater distance.
    pub fn insert<F>(&mut self, id: ClusterId, distance_of: F)
    where
        F: Fn(ClusterId) -> f64,
    {
        let distance = distance_of(id);
        let position = self
            .order
            .iter()
            .position(|&queued| distance < distance_of(queued))
            .unwrap_or(self.order.len());
        self.order.insert(position, id);
    }

    /// Moves `id` to the place matching its current distance.
    pub fn relocate<F>(&mut self, id: ClusterId, distance_of: F) -> bool
    where
        F: Fn(ClusterId) -> f64,
    {
        if !self.remove(id) {
            return false;
        }
        self.insert(id, distance_of);
        true
    }
}
