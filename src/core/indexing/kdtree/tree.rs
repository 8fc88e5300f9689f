// src/core/indexing/kdtree/tree.rs

//! Defines the `KdTree` container and its dynamic insertion.

use std::collections::HashMap;

use super::error::{KdTreeError, KdTreeResult};
use super::node::{KdNode, NodeId};

/// A dynamic KD-Tree over `f64` points with optional payloads.
///
/// All nodes live in an arena keyed by `NodeId`. The dimension is fixed by the
/// first point that enters the tree and every later point must match it.
///
/// The partition invariant maintained by every operation: for a node with
/// discriminator `d`, points in its right subtree have `point[d] >= node[d]`
/// and points in its left subtree have `point[d] < node[d]`.
#[derive(Debug, Clone)]
pub struct KdTree<P> {
    pub(super) nodes: HashMap<NodeId, KdNode<P>>,
    pub(super) root: Option<NodeId>,
    pub(super) next_node_id: NodeId,
    pub(super) dimension: Option<usize>,
}

impl<P> Default for KdTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> KdTree<P> {
    /// Creates a new, empty KD-Tree. The dimension is set by the first insert.
    pub fn new() -> Self {
        Self { nodes: HashMap::new(), root: None, next_node_id: 0, dimension: None }
    }

    /// Number of points stored in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dimensionality of the indexed points, `None` until the first point arrives.
    pub const fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&KdNode<P>> {
        self.nodes.get(&node_id)
    }

    /// Existing children of a node, left first.
    pub fn children(&self, node_id: NodeId) -> Vec<NodeId> {
        self.node(node_id)
            .map(|node| node.left.into_iter().chain(node.right).collect())
            .unwrap_or_default()
    }

    /// Pre-order traversal over all nodes, starting at the root.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter { tree: self, stack: self.root.into_iter().collect() }
    }

    /// Removes every node. The dimension is released as well.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.dimension = None;
    }

    /// Inserts a point with an optional payload and returns the id of the new node.
    ///
    /// Descends from the root, going right when `node[disc] <= point[disc]` and
    /// left otherwise. The new node discriminates on the dimension after its
    /// parent's. No rebalancing is performed.
    pub fn insert(&mut self, point: Vec<f64>, payload: Option<P>) -> KdTreeResult<NodeId> {
        self.check_dimension(&point)?;

        let Some(mut current) = self.root else {
            self.dimension = Some(point.len());
            let node_id = self.allocate(KdNode::new(point, payload, 0, None));
            self.root = Some(node_id);
            return Ok(node_id);
        };

        let dimension = point.len();
        loop {
            let node = &self.nodes[&current];
            let disc = (node.disc + 1) % dimension;
            let go_right = node.split_value() <= point[node.disc];
            let next = if go_right { node.right } else { node.left };

            match next {
                Some(child) => current = child,
                None => {
                    let node_id = self.allocate(KdNode::new(point, payload, disc, Some(current)));
                    if let Some(parent) = self.nodes.get_mut(&current) {
                        if go_right {
                            parent.right = Some(node_id);
                        } else {
                            parent.left = Some(node_id);
                        }
                    }
                    return Ok(node_id);
                }
            }
        }
    }

    /// Validates a point against the tree dimension (or any dimension when empty).
    pub(super) fn check_dimension(&self, point: &[f64]) -> KdTreeResult<()> {
        if point.is_empty() {
            return Err(KdTreeError::EmptyPoint);
        }
        match self.dimension {
            Some(expected) if expected != point.len() => {
                Err(KdTreeError::DimensionMismatch { expected, actual: point.len() })
            }
            _ => Ok(()),
        }
    }

    pub(super) fn allocate(&mut self, node: KdNode<P>) -> NodeId {
        let node_id = self.next_node_id;
        self.next_node_id += 1;
        self.nodes.insert(node_id, node);
        node_id
    }

    pub(super) fn node_mut(&mut self, node_id: NodeId) -> Option<&mut KdNode<P>> {
        self.nodes.get_mut(&node_id)
    }
}

/// Pre-order iterator returned by [`KdTree::iter`].
#[derive(Debug)]
pub struct Iter<'a, P> {
    tree: &'a KdTree<P>,
    stack: Vec<NodeId>,
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = (NodeId, &'a KdNode<P>);

    fn next(&mut self) -> Option<Self::Item> {
        let node_id = self.stack.pop()?;
        let node = self.tree.nodes.get(&node_id)?;
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((node_id, node))
    }
}
