// src/core/indexing/kdtree/node.rs

//! Defines `KdNode`, a single point of the KD-Tree together with its links.

/// Node identifier type. Identifiers are never reused within one tree, so a
/// stale id simply stops resolving after its node is removed.
pub type NodeId = usize;

/// A node of the KD-Tree.
///
/// Children and parent are stored as `NodeId`s into the tree's node arena. The
/// parent link is a plain back-reference: ownership of every node belongs to
/// the tree, never to another node.
#[derive(Debug, Clone, PartialEq)]
pub struct KdNode<P> {
    pub(super) point: Vec<f64>,
    pub(super) payload: Option<P>,
    pub(super) disc: usize,
    pub(super) parent: Option<NodeId>,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
}

impl<P> KdNode<P> {
    pub(super) const fn new(
        point: Vec<f64>,
        payload: Option<P>,
        disc: usize,
        parent: Option<NodeId>,
    ) -> Self {
        Self { point, payload, disc, parent, left: None, right: None }
    }

    /// Coordinates stored in this node.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Payload attached to the point, if any.
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Dimension this node partitions its subtree on.
    pub const fn discriminator(&self) -> usize {
        self.disc
    }

    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub const fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub const fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Coordinate along this node's own discriminator.
    pub(super) fn split_value(&self) -> f64 {
        self.point[self.disc]
    }
}
