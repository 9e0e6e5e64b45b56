// src/data_analysis/correlation.rs

use ndarray::Array2;
use ndarray_stats::CorrelationExt;
use std::error::Error;

use crate::data_input::correlation_data::CorrelationTable;

/// Pairwise Pearson correlation across all retained indices.
///
/// A column with zero variance makes the coefficient undefined; that case is
/// reported as an error naming the degenerate column instead of letting NaNs
/// leak into the matrix. The returned matrix is symmetric with unit diagonal.
pub fn correlation_matrix(table: &CorrelationTable) -> Result<Array2<f64>, Box<dyn Error>> {
    if table.n_observations() < 2 {
        return Err("Correlation needs at least two observations".into());
    }

    for (col, name) in table.index_names.iter().enumerate() {
        let column = table.observations.column(col);
        let first = column[0];
        if column.iter().all(|v| (v - first).abs() < f64::EPSILON) {
            return Err(format!(
                "Index column '{}' has zero variance; correlation is undefined",
                name
            )
            .into());
        }
    }

    // Rows of the input must be the random variables, so feed the
    // index-major orientation.
    let mut matrix = table
        .index_major()
        .pearson_correlation()
        .map_err(|e| format!("Correlation computation failed: {}", e))?;

    // Tidy floating-point noise: mirror the upper triangle and pin the
    // diagonal at exactly 1.0.
    let n = matrix.nrows();
    for i in 0..n {
        matrix[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let mean = 0.5 * (matrix[[i, j]] + matrix[[j, i]]);
            matrix[[i, j]] = mean;
            matrix[[j, i]] = mean;
        }
    }

    Ok(matrix)
}
