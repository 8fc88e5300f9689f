// src/core/indexing/kdtree/tests/mod.rs

mod test_builder;

use super::{KdTree, NodeId};

/// Walks the whole tree and checks parent links and the partition invariant:
/// right descendants are `>=` and left descendants `<` along each node's
/// discriminator.
pub(super) fn assert_tree_invariants<P>(tree: &KdTree<P>) {
    let Some(root) = tree.root() else {
        assert_eq!(tree.len(), 0, "tree without root must be empty");
        return;
    };
    assert_eq!(tree.node(root).unwrap().parent(), None, "root must not have a parent");

    let mut visited = 0;
    for (node_id, node) in tree.iter() {
        visited += 1;
        let disc = node.discriminator();
        let split = node.point()[disc];

        for child in tree.children(node_id) {
            assert_eq!(tree.node(child).unwrap().parent(), Some(node_id), "broken parent link");
        }
        if let Some(right) = node.right() {
            for id in subtree(tree, right) {
                assert!(
                    tree.node(id).unwrap().point()[disc] >= split,
                    "right descendant {:?} below split {} of {:?}",
                    tree.node(id).unwrap().point(),
                    split,
                    node.point()
                );
            }
        }
        if let Some(left) = node.left() {
            for id in subtree(tree, left) {
                assert!(
                    tree.node(id).unwrap().point()[disc] < split,
                    "left descendant {:?} not below split {} of {:?}",
                    tree.node(id).unwrap().point(),
                    split,
                    node.point()
                );
            }
        }
    }
    assert_eq!(visited, tree.len(), "every node must be reachable from the root");
}

fn subtree<P>(tree: &KdTree<P>, head: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = vec![head];
    while let Some(id) = stack.pop() {
        result.push(id);
        stack.extend(tree.children(id));
    }
    result
}
