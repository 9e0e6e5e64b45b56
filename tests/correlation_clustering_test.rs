// tests/correlation_clustering_test.rs
//
// End-to-end checks of the correlation half of the report, short of pixel
// rendering: CSV fixture -> parser -> correlation matrix -> Ward clustering.

use std::fs;

use complexity_bench_render::data_analysis::clustering::{
    cut_tree, euclidean_distance_matrix, ward_linkage,
};
use complexity_bench_render::data_analysis::correlation::correlation_matrix;
use complexity_bench_render::data_input::correlation_parser::parse_correlation_file;

// Two families of indices: A1/A2 track one latent signal, B1/B2 another.
// Noise and Intensity columns are present and must be dropped.
fn write_correlation_fixture(dir: &std::path::Path) -> std::path::PathBuf {
    let mut csv = String::from("Noise,Intensity,A1,A2,B1,B2\n");
    for i in 0..40 {
        let t = i as f64 / 10.0;
        let latent_a = (t * 1.7).sin();
        let latent_b = (t * 0.9).cos() * 2.0;
        // Deterministic wiggle keeps the within-family correlation below 1.
        let wiggle = ((i * 7919) % 13) as f64 / 13.0 - 0.5;
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            0.1 * (i % 3) as f64,
            (i % 5) as f64,
            latent_a + 0.05 * wiggle,
            1.5 * latent_a + 0.07 * wiggle,
            latent_b - 0.05 * wiggle,
            0.8 * latent_b + 0.06 * wiggle,
        ));
    }
    let path = dir.join("data_Correlations.csv");
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn correlation_matrix_is_symmetric_with_unit_diagonal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_correlation_fixture(dir.path());

    let table = parse_correlation_file(&path).unwrap();
    assert_eq!(table.index_names, vec!["A1", "A2", "B1", "B2"]);
    assert_eq!(table.n_observations(), 40);

    let matrix = correlation_matrix(&table).unwrap();
    let n = matrix.nrows();
    assert_eq!(n, 4);
    for i in 0..n {
        assert!((matrix[[i, i]] - 1.0).abs() < 1e-12);
        for j in 0..n {
            assert!((matrix[[i, j]] - matrix[[j, i]]).abs() < 1e-12);
            assert!(matrix[[i, j]].abs() <= 1.0 + 1e-9);
        }
    }

    // Within-family correlation dominates the cross-family one.
    assert!(matrix[[0, 1]] > 0.9);
    assert!(matrix[[2, 3]] > 0.9);
    assert!(matrix[[0, 1]] > matrix[[0, 2]].abs());
}

#[test]
fn clustering_recovers_the_index_families() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_correlation_fixture(dir.path());

    let table = parse_correlation_file(&path).unwrap();
    let distances = euclidean_distance_matrix(table.index_major());
    let merges = ward_linkage(&distances).unwrap();
    assert_eq!(merges.len(), 3);

    // Merge heights are monotone under Ward's criterion.
    for pair in merges.windows(2) {
        assert!(pair[0].height <= pair[1].height + 1e-12);
    }

    let groups = cut_tree(&merges, table.n_indices(), 2);
    assert_eq!(groups[0], groups[1], "A1 and A2 should share a group");
    assert_eq!(groups[2], groups[3], "B1 and B2 should share a group");
    assert_ne!(groups[0], groups[2]);
}

#[test]
fn zero_variance_column_fails_predictably() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_Correlations.csv");
    fs::write(
        &path,
        "A,Const,B\n1.0,5.0,0.2\n2.0,5.0,0.4\n3.0,5.0,0.1\n",
    )
    .unwrap();

    let table = parse_correlation_file(&path).unwrap();
    let err = correlation_matrix(&table).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'Const'"), "message was: {}", message);
    assert!(message.contains("zero variance"));
}

#[test]
fn four_group_cut_on_a_larger_index_set() {
    // Eight indices in four tight pairs, pairwise far apart.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data_Correlations.csv");
    let mut csv = String::from("I1,I2,I3,I4,I5,I6,I7,I8\n");
    let centers = [0.0, 10.0, 20.0, 30.0];
    for i in 0..20 {
        let jitter = (i % 4) as f64 * 0.05;
        let values: Vec<String> = centers
            .iter()
            .flat_map(|&c| {
                vec![
                    format!("{}", c + jitter + (i as f64 * 0.01)),
                    format!("{}", c + 0.3 - jitter + (i as f64 * 0.01)),
                ]
            })
            .collect();
        csv.push_str(&values.join(","));
        csv.push('\n');
    }
    fs::write(&path, csv).unwrap();

    let table = parse_correlation_file(&path).unwrap();
    let distances = euclidean_distance_matrix(table.index_major());
    let merges = ward_linkage(&distances).unwrap();
    let groups = cut_tree(&merges, 8, 4);

    let mut distinct = groups.clone();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), 4);
    for pair in 0..4 {
        assert_eq!(
            groups[2 * pair],
            groups[2 * pair + 1],
            "paired indices should share a group"
        );
    }
}
