// src/pipeline.rs
//
// The two report pipelines, each a single pass from CSV to figures. main
// decides which pipelines run; each one owns its console narration.

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::constants::{
    DENDROGRAM_TARGET_GROUPS, FIG_CORRELATION_MATRIX, FIG_DENDROGRAM, FIG_TIME_BY_LENGTH,
    FIG_TIME_BY_METHOD, FIG_TIME_VIOLIN,
};
use crate::data_analysis::clustering::{cut_tree, euclidean_distance_matrix, ward_linkage};
use crate::data_analysis::correlation::correlation_matrix;
use crate::data_analysis::summary::{
    method_order, summarize_method_lengths, summarize_methods, MethodSummary,
};
use crate::data_input::correlation_parser::parse_correlation_file;
use crate::data_input::timing_parser::parse_timing_file;
use crate::plot_framework::format_duration_s;
use crate::plot_functions::plot_correlation_matrix::plot_correlation_matrix;
use crate::plot_functions::plot_dendrogram::plot_dendrogram;
use crate::plot_functions::plot_duration_by_length::plot_duration_by_length;
use crate::plot_functions::plot_duration_by_method::plot_duration_by_method;
use crate::plot_functions::plot_duration_violin::plot_duration_violin;

pub struct TimingOutput {
    pub summaries: Vec<MethodSummary>,
    pub figures: Vec<String>,
}

pub struct CorrelationOutput {
    pub index_names: Vec<String>,
    pub assignment: Vec<usize>,
    pub figures: Vec<String>,
}

/// Timing pipeline: parse, aggregate, print the summary table, render the
/// three computation-time figures.
pub fn run_timing_pipeline(
    csv_path: &Path,
    output_dir: &Path,
) -> Result<TimingOutput, Box<dyn Error>> {
    println!("\n--- Loading Computation Time Data ---");
    let rows = parse_timing_file(csv_path)?;

    let summaries = summarize_methods(&rows);
    let order = method_order(&summaries);
    let bands = summarize_method_lengths(&rows);

    println!("\nPer-method summary (ascending by median):");
    println!(
        "  {:<16} {:>7} {:>12} {:>12} {:>12}",
        "Method", "Trials", "Median", "Mean", "SD"
    );
    for s in &summaries {
        println!(
            "  {:<16} {:>7} {:>12} {:>12} {:>12}",
            s.method,
            s.trials,
            format_duration_s(s.median_s),
            format_duration_s(s.mean_s),
            format_duration_s(s.std_dev_s),
        );
    }

    println!("\n--- Generating Computation Time Plots ---");
    let mut figures = Vec::new();
    let by_method: PathBuf = output_dir.join(FIG_TIME_BY_METHOD);
    plot_duration_by_method(&rows, &summaries, &by_method)?;
    figures.push(FIG_TIME_BY_METHOD.to_string());

    let by_length = output_dir.join(FIG_TIME_BY_LENGTH);
    plot_duration_by_length(&bands, &order, &by_length)?;
    figures.push(FIG_TIME_BY_LENGTH.to_string());

    let violin = output_dir.join(FIG_TIME_VIOLIN);
    plot_duration_violin(&rows, &order, &violin)?;
    figures.push(FIG_TIME_VIOLIN.to_string());

    Ok(TimingOutput { summaries, figures })
}

/// Correlation pipeline: parse, correlate, cluster, render the matrix and
/// dendrogram figures.
pub fn run_correlation_pipeline(
    csv_path: &Path,
    output_dir: &Path,
) -> Result<CorrelationOutput, Box<dyn Error>> {
    println!("\n--- Loading Correlation Data ---");
    let table = parse_correlation_file(csv_path)?;

    println!("\n--- Computing Correlation Matrix ---");
    let matrix = correlation_matrix(&table)?;
    println!(
        "  {}x{} correlation matrix computed.",
        matrix.nrows(),
        matrix.ncols()
    );

    println!("\n--- Clustering Indices (Ward) ---");
    // Clustering runs over indices, not observations: each index is a point
    // whose coordinates are its values across all observations.
    let distances = euclidean_distance_matrix(table.index_major());
    let merges = ward_linkage(&distances)?;
    let n_groups = DENDROGRAM_TARGET_GROUPS.min(table.n_indices());
    let assignment = cut_tree(&merges, table.n_indices(), n_groups);
    println!(
        "  {} merges, cut into {} groups.",
        merges.len(),
        n_groups
    );

    println!("\n--- Generating Correlation Plots ---");
    let mut figures = Vec::new();
    let matrix_path = output_dir.join(FIG_CORRELATION_MATRIX);
    plot_correlation_matrix(&matrix, &table.index_names, &matrix_path)?;
    figures.push(FIG_CORRELATION_MATRIX.to_string());

    let dendrogram_path = output_dir.join(FIG_DENDROGRAM);
    plot_dendrogram(&merges, &table.index_names, &assignment, &dendrogram_path)?;
    figures.push(FIG_DENDROGRAM.to_string());

    Ok(CorrelationOutput {
        index_names: table.index_names,
        assignment,
        figures,
    })
}
