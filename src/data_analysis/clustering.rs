// src/data_analysis/clustering.rs

use ndarray::{Array2, ArrayView2};
use std::error::Error;

/// One agglomerative merge step. Node ids follow the usual linkage-matrix
/// convention: ids below `n_leaves` are leaves, id `n_leaves + k` is the
/// cluster produced by merge `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub height: f64,
    pub size: usize,
}

/// Pairwise Euclidean distances between the rows of `points`.
pub fn euclidean_distance_matrix(points: ArrayView2<f64>) -> Array2<f64> {
    let n = points.nrows();
    let mut dist = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let mut sum_sq = 0.0;
            for (a, b) in points.row(i).iter().zip(points.row(j).iter()) {
                let d = a - b;
                sum_sq += d * d;
            }
            let d = sum_sq.sqrt();
            dist[[i, j]] = d;
            dist[[j, i]] = d;
        }
    }
    dist
}

/// Agglomerative hierarchical clustering under Ward's variance-minimizing
/// criterion, starting from a Euclidean distance matrix.
///
/// Cluster distances are maintained in squared space, where the
/// Lance-Williams update for Ward's rule is exact; recorded merge heights
/// are the square roots, matching the usual linkage output. Ties pick the
/// pair with the smallest slot indices.
pub fn ward_linkage(distances: &Array2<f64>) -> Result<Vec<Merge>, Box<dyn Error>> {
    let n = distances.nrows();
    if distances.ncols() != n {
        return Err("Distance matrix must be square".into());
    }
    if n < 2 {
        return Err("Need at least two items to cluster".into());
    }

    let mut d2: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| distances[[i, j]].powi(2)).collect())
        .collect();
    // active[slot] = Some((node_id, cluster_size)); a merge lands in the
    // lower slot and frees the higher one.
    let mut active: Vec<Option<(usize, usize)>> = (0..n).map(|i| Some((i, 1))).collect();
    let mut merges: Vec<Merge> = Vec::with_capacity(n - 1);

    for step in 0..n - 1 {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if active[i].is_none() {
                continue;
            }
            for j in (i + 1)..n {
                if active[j].is_none() {
                    continue;
                }
                let d = d2[i][j];
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }
        let (i, j, d2_ij) = best.ok_or("No active cluster pair left")?;
        let (id_i, size_i) = active[i].ok_or("Inactive slot selected")?;
        let (id_j, size_j) = active[j].ok_or("Inactive slot selected")?;

        let ni = size_i as f64;
        let nj = size_j as f64;
        for k in 0..n {
            if k == i || k == j {
                continue;
            }
            if let Some((_, size_k)) = active[k] {
                let nk = size_k as f64;
                let updated =
                    ((ni + nk) * d2[i][k] + (nj + nk) * d2[j][k] - nk * d2_ij) / (ni + nj + nk);
                d2[i][k] = updated;
                d2[k][i] = updated;
            }
        }

        let merged_size = size_i + size_j;
        merges.push(Merge {
            left: id_i.min(id_j),
            right: id_i.max(id_j),
            height: d2_ij.max(0.0).sqrt(),
            size: merged_size,
        });
        active[i] = Some((n + step, merged_size));
        active[j] = None;
    }

    Ok(merges)
}

/// Left-to-right leaf ordering of the merge tree, for dendrogram layout.
pub fn leaf_order(merges: &[Merge], n_leaves: usize) -> Vec<usize> {
    if merges.is_empty() {
        return (0..n_leaves).collect();
    }
    let root = n_leaves + merges.len() - 1;
    let mut order = Vec::with_capacity(n_leaves);
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node < n_leaves {
            order.push(node);
        } else {
            let m = &merges[node - n_leaves];
            // Push right first so the left subtree is visited first.
            stack.push(m.right);
            stack.push(m.left);
        }
    }
    order
}

/// Flat cluster assignment from cutting the tree into `n_groups` groups.
///
/// Group ids are numbered 0..n_groups in left-to-right dendrogram order so
/// colors stay stable between the dendrogram and the membership table.
pub fn cut_tree(merges: &[Merge], n_leaves: usize, n_groups: usize) -> Vec<usize> {
    let n_groups = n_groups.clamp(1, n_leaves.max(1));
    let to_apply = n_leaves.saturating_sub(n_groups).min(merges.len());

    let total = n_leaves + merges.len();
    let mut node_leaves: Vec<Vec<usize>> = (0..total)
        .map(|i| if i < n_leaves { vec![i] } else { Vec::new() })
        .collect();
    let mut consumed = vec![false; total];
    for (idx, m) in merges.iter().take(to_apply).enumerate() {
        let mut leaves = node_leaves[m.left].clone();
        leaves.extend(node_leaves[m.right].iter().copied());
        consumed[m.left] = true;
        consumed[m.right] = true;
        node_leaves[n_leaves + idx] = leaves;
    }

    let order = leaf_order(merges, n_leaves);
    let mut pos = vec![0usize; n_leaves];
    for (p, &leaf) in order.iter().enumerate() {
        pos[leaf] = p;
    }

    let mut clusters: Vec<&Vec<usize>> = (0..n_leaves + to_apply)
        .filter(|&id| !consumed[id] && !node_leaves[id].is_empty())
        .map(|id| &node_leaves[id])
        .collect();
    clusters.sort_by_key(|leaves| leaves.iter().map(|&l| pos[l]).min().unwrap_or(0));

    let mut assignment = vec![0usize; n_leaves];
    for (group, leaves) in clusters.iter().enumerate() {
        for &leaf in leaves.iter() {
            assignment[leaf] = group;
        }
    }
    assignment
}

/// First leaf under `node`, walking left children. Used to look up the
/// cluster color of a subtree.
pub fn first_leaf(merges: &[Merge], n_leaves: usize, node: usize) -> usize {
    let mut current = node;
    while current >= n_leaves {
        current = merges[current - n_leaves].left;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // Two tight groups far apart: {0, 1} near the origin, {2, 3} near 10.
    fn two_group_points() -> Array2<f64> {
        array![[0.0, 0.0], [0.5, 0.0], [10.0, 0.0], [10.5, 0.0]]
    }

    #[test]
    fn distance_matrix_is_symmetric_with_zero_diagonal() {
        let points = two_group_points();
        let dist = euclidean_distance_matrix(points.view());
        for i in 0..4 {
            assert!((dist[[i, i]]).abs() < 1e-12);
            for j in 0..4 {
                assert!((dist[[i, j]] - dist[[j, i]]).abs() < 1e-12);
            }
        }
        assert!((dist[[0, 1]] - 0.5).abs() < 1e-12);
        assert!((dist[[0, 2]] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn ward_merges_tight_pairs_first() {
        let points = two_group_points();
        let dist = euclidean_distance_matrix(points.view());
        let merges = ward_linkage(&dist).unwrap();
        assert_eq!(merges.len(), 3);
        // The two within-group pairs merge before the between-group join.
        assert_eq!((merges[0].left, merges[0].right), (0, 1));
        assert_eq!((merges[1].left, merges[1].right), (2, 3));
        assert_eq!(merges[2].size, 4);
    }

    #[test]
    fn ward_heights_non_decreasing() {
        let points = array![
            [0.0, 0.0],
            [1.0, 0.2],
            [0.3, 0.9],
            [5.0, 5.0],
            [5.5, 4.8],
            [9.0, 0.1],
        ];
        let dist = euclidean_distance_matrix(points.view());
        let merges = ward_linkage(&dist).unwrap();
        for pair in merges.windows(2) {
            assert!(pair[0].height <= pair[1].height + 1e-12);
        }
    }

    #[test]
    fn cut_recovers_obvious_groups() {
        let points = two_group_points();
        let dist = euclidean_distance_matrix(points.view());
        let merges = ward_linkage(&dist).unwrap();
        let groups = cut_tree(&merges, 4, 2);
        assert_eq!(groups[0], groups[1]);
        assert_eq!(groups[2], groups[3]);
        assert_ne!(groups[0], groups[2]);
    }

    #[test]
    fn cut_group_count_and_ordering() {
        let points = two_group_points();
        let dist = euclidean_distance_matrix(points.view());
        let merges = ward_linkage(&dist).unwrap();

        let groups = cut_tree(&merges, 4, 4);
        let mut distinct = groups.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct.len(), 4);

        // The leftmost dendrogram leaf is always in group 0.
        let groups2 = cut_tree(&merges, 4, 2);
        let order = leaf_order(&merges, 4);
        assert_eq!(groups2[order[0]], 0);
    }

    #[test]
    fn leaf_order_is_a_permutation() {
        let points = two_group_points();
        let dist = euclidean_distance_matrix(points.view());
        let merges = ward_linkage(&dist).unwrap();
        let mut order = leaf_order(&merges, 4);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_pair_cluster() {
        let dist = array![[0.0, 2.0], [2.0, 0.0]];
        let merges = ward_linkage(&dist).unwrap();
        assert_eq!(merges.len(), 1);
        assert!((merges[0].height - 2.0).abs() < 1e-12);
        assert_eq!(first_leaf(&merges, 2, 2), 0);
    }

    #[test]
    fn degenerate_inputs_are_errors() {
        let one = array![[0.0]];
        assert!(ward_linkage(&one).is_err());
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(ward_linkage(&rect).is_err());
    }
}
