// src/core/indexing/kdtree/remove.rs

//! Node removal.
//!
//! A removed internal node is replaced by the node holding the minimal
//! coordinate, along the removed node's own discriminator, of its right
//! subtree. When there is no right subtree the left subtree is moved to the
//! right first. The minimal node is itself removed recursively from its old
//! position before it is spliced in. Any other choice of replacement (wrong
//! subtree, wrong dimension) breaks the partition invariant without any
//! visible failure.

use super::node::NodeId;
use super::tree::KdTree;

impl<P> KdTree<P> {
    /// Removes one node holding exactly `point`. Returns `false` when absent.
    pub fn remove(&mut self, point: &[f64]) -> bool {
        match self.find_node(point, None) {
            Some(node_id) => self.remove_node(node_id),
            None => false,
        }
    }

    /// Removes the node holding exactly `point` with the given payload.
    /// Returns `false` when no such node exists.
    pub fn remove_with_payload(&mut self, point: &[f64], payload: &P) -> bool
    where
        P: PartialEq,
    {
        match self.find_node_with_payload(point, payload, None) {
            Some(node_id) => self.remove_node(node_id),
            None => false,
        }
    }

    /// Removes the node with the given id. Returns `false` when it is not in the tree.
    pub fn remove_node(&mut self, node_id: NodeId) -> bool {
        let Some(parent) = self.nodes.get(&node_id).map(|node| node.parent) else {
            return false;
        };

        let replacement = self.recursive_remove(node_id);
        match parent {
            None => {
                self.root = replacement;
                if let Some(node) = replacement.and_then(|id| self.node_mut(id)) {
                    node.parent = None;
                }
            }
            Some(parent_id) => self.replace_child(parent_id, node_id, replacement),
        }

        self.nodes.remove(&node_id);
        true
    }

    /// Detaches `removed` from its subtree and returns the node that takes its
    /// place (with the place's links already rewritten), or `None` for a leaf.
    /// The link from `removed`'s parent is left to the caller.
    fn recursive_remove(&mut self, removed: NodeId) -> Option<NodeId> {
        let (disc, left, right) = {
            let node = self.nodes.get(&removed)?;
            (node.disc, node.left, node.right)
        };

        let right_head = match (left, right) {
            (None, None) => return None,
            (Some(left_head), None) => {
                let node = self.node_mut(removed)?;
                node.right = Some(left_head);
                node.left = None;
                left_head
            }
            (_, Some(right_head)) => right_head,
        };

        let minimal = self.find_minimal_node(right_head, disc)?;
        let minimal_parent = self.nodes.get(&minimal)?.parent?;

        let sub_replacement = self.recursive_remove(minimal);
        self.replace_child(minimal_parent, minimal, sub_replacement);

        self.splice(minimal, removed);
        Some(minimal)
    }

    /// Moves `replacement` into the slot of `removed`: discriminator, parent and
    /// both children are taken over, and the children's back-links are rewritten
    /// in the same step.
    fn splice(&mut self, replacement: NodeId, removed: NodeId) {
        let Some((disc, parent, left, right)) = self
            .nodes
            .get(&removed)
            .map(|node| (node.disc, node.parent, node.left, node.right))
        else {
            return;
        };

        if let Some(node) = self.node_mut(replacement) {
            node.disc = disc;
            node.parent = parent;
            node.left = left;
            node.right = right;
        }
        for child in left.into_iter().chain(right) {
            if let Some(node) = self.node_mut(child) {
                node.parent = Some(replacement);
            }
        }
    }

    /// Points `parent`'s link to `old_child` at `new_child` instead.
    fn replace_child(&mut self, parent: NodeId, old_child: NodeId, new_child: Option<NodeId>) {
        if let Some(node) = self.node_mut(parent) {
            if node.left == Some(old_child) {
                node.left = new_child;
            } else if node.right == Some(old_child) {
                node.right = new_child;
            }
        }
        if let Some(node) = new_child.and_then(|id| self.node_mut(id)) {
            node.parent = Some(parent);
        }
    }

    /// Finds the node with the smallest coordinate along `disc` in the subtree
    /// rooted at `head`, walking it in order with an explicit stack. The first
    /// minimum met in order wins.
    fn find_minimal_node(&self, head: NodeId, disc: usize) -> Option<NodeId> {
        let mut stack = Vec::new();
        let mut best: Option<(f64, NodeId)> = None;
        let mut current = Some(head);

        loop {
            if let Some(node_id) = current {
                stack.push(node_id);
                current = self.nodes.get(&node_id).and_then(|node| node.left);
                continue;
            }

            let Some(node_id) = stack.pop() else {
                break;
            };
            let node = self.nodes.get(&node_id)?;
            let value = node.point[disc];
            if best.map_or(true, |(best_value, _)| value < best_value) {
                best = Some((value, node_id));
            }
            current = node.right;
        }

        best.map(|(_, node_id)| node_id)
    }
}
