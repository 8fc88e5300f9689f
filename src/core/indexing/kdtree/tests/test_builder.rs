// src/core/indexing/kdtree/tests/test_builder.rs

#[cfg(test)]
mod builder_tests {
    use super::super::assert_tree_invariants;
    use crate::core::indexing::kdtree::{KdTree, KdTreeError};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample_points() -> Vec<Vec<f64>> {
        vec![
            vec![4.0, 3.0],
            vec![3.0, 4.0],
            vec![5.0, 8.0],
            vec![3.0, 3.0],
            vec![3.0, 9.0],
            vec![6.0, 4.0],
            vec![5.0, 9.0],
        ]
    }

    fn point_of(tree: &KdTree<usize>, node_id: Option<usize>) -> Vec<f64> {
        tree.node(node_id.expect("node expected")).unwrap().point().to_vec()
    }

    #[test]
    fn test_build_empty() {
        let tree: KdTree<()> = KdTree::balanced(Vec::new(), None).unwrap();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.dimension(), None);
    }

    #[test]
    fn test_build_single_point() {
        let tree: KdTree<()> = KdTree::balanced(vec![vec![1.0, 2.0]], None).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.dimension(), Some(2));
        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.point(), &[1.0, 2.0]);
        assert_eq!(root.discriminator(), 0);
        assert!(root.is_leaf());
        assert!(root.payload().is_none());
    }

    #[test]
    fn test_build_places_medians() {
        let payloads: Vec<usize> = (0..7).collect();
        let tree = KdTree::balanced(sample_points(), Some(payloads)).unwrap();
        assert_eq!(tree.len(), 7);

        let root_id = tree.root();
        let root = tree.node(root_id.unwrap()).unwrap();
        assert_eq!(root.point(), &[4.0, 3.0]);
        assert_eq!(root.payload(), Some(&0));
        assert_eq!(root.discriminator(), 0);

        // Left half is split on y: [3,3] < [3,4] <= [3,9].
        assert_eq!(point_of(&tree, root.left()), vec![3.0, 4.0]);
        let left = tree.node(root.left().unwrap()).unwrap();
        assert_eq!(left.discriminator(), 1);
        assert_eq!(point_of(&tree, left.left()), vec![3.0, 3.0]);
        assert_eq!(point_of(&tree, left.right()), vec![3.0, 9.0]);

        assert_eq!(point_of(&tree, root.right()), vec![5.0, 8.0]);
        let right = tree.node(root.right().unwrap()).unwrap();
        assert_eq!(point_of(&tree, right.left()), vec![6.0, 4.0]);
        assert_eq!(point_of(&tree, right.right()), vec![5.0, 9.0]);

        assert_tree_invariants(&tree);
    }

    #[test]
    fn test_build_sends_median_duplicates_right() {
        let points = vec![vec![1.0], vec![2.0], vec![2.0], vec![2.0], vec![3.0]];
        let payloads: Vec<usize> = (0..points.len()).collect();
        let tree = KdTree::balanced(points.clone(), Some(payloads)).unwrap();

        let root = tree.node(tree.root().unwrap()).unwrap();
        assert_eq!(root.point(), &[2.0]);
        // Only the strictly smaller point may sit on the left.
        let left = tree.node(root.left().unwrap()).unwrap();
        assert_eq!(left.point(), &[1.0]);
        assert!(left.is_leaf());

        assert_tree_invariants(&tree);
        for (index, point) in points.iter().enumerate() {
            assert!(tree.find_node_with_payload(point, &index, None).is_some());
        }
    }

    #[test]
    fn test_build_all_identical_points() {
        let points = vec![vec![1.0, 1.0]; 6];
        let payloads: Vec<usize> = (0..6).collect();
        let tree = KdTree::balanced(points, Some(payloads)).unwrap();

        assert_eq!(tree.len(), 6);
        assert_tree_invariants(&tree);
        for payload in 0..6 {
            let node_id = tree.find_node_with_payload(&[1.0, 1.0], &payload, None).unwrap();
            assert_eq!(tree.node(node_id).unwrap().payload(), Some(&payload));
        }
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let points = vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]];
        match KdTree::<()>::balanced(points, None) {
            Err(KdTreeError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected DimensionMismatch, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_zero_dimension_error() {
        let result = KdTree::<()>::balanced(vec![Vec::new()], None);
        assert!(matches!(result, Err(KdTreeError::EmptyPoint)));
    }

    #[test]
    fn test_payload_count_mismatch_error() {
        let result = KdTree::balanced(vec![vec![1.0], vec![2.0]], Some(vec![1_u8]));
        assert!(matches!(result, Err(KdTreeError::InvalidInput(_))));
    }

    #[test]
    fn test_balanced_tree_is_shallow() {
        let mut rng = StdRng::seed_from_u64(7);
        let points: Vec<Vec<f64>> =
            (0..1023).map(|_| vec![rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)]).collect();
        let tree: KdTree<()> = KdTree::balanced(points, None).unwrap();

        let mut max_depth = 0;
        for (node_id, _) in tree.iter() {
            let mut depth = 0;
            let mut current = tree.node(node_id).unwrap().parent();
            while let Some(parent) = current {
                depth += 1;
                current = tree.node(parent).unwrap().parent();
            }
            max_depth = max_depth.max(depth);
        }
        // 1023 distinct points fit in 10 levels.
        assert!(max_depth <= 10, "depth {max_depth} too large for a balanced build");
        assert_tree_invariants(&tree);
    }

    #[test]
    fn test_insert_after_balanced_build() {
        let mut rng = StdRng::seed_from_u64(11);
        let points: Vec<Vec<f64>> = (0..64)
            .map(|_| (0..3).map(|_| f64::from(rng.gen_range(0..8_i32))).collect())
            .collect();
        let mut tree: KdTree<()> = KdTree::balanced(points, None).unwrap();

        for _ in 0..64 {
            let point: Vec<f64> = (0..3).map(|_| f64::from(rng.gen_range(0..8_i32))).collect();
            let node_id = tree.insert(point.clone(), None).unwrap();
            assert_eq!(tree.node(node_id).unwrap().point(), point.as_slice());
        }

        assert_eq!(tree.len(), 128);
        assert_tree_invariants(&tree);
    }
}
