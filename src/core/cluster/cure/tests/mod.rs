
/// Asserts that `clusters` is a partition of `0..point_count`.
pub(super) fn assert_partition(clusters: &[Vec<usize>], point_count: usize) {
    let mut members: Vec<usize> = clusters.iter().flatten().copied().collect();
    members.sort_unstable();
    assert_eq!(members, (0..point_count).collect::<Vec<_>>(), "clusters do not partition the input");
    assert!(clusters.iter().all(|cluster| !cluster.is_empty()), "empty cluster in result");
}
