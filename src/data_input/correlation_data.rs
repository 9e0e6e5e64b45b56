// src/data_input/correlation_data.rs

use ndarray::{Array2, ArrayView2};

/// The correlation input table after parsing: one row per observation
/// (simulated signal), one column per retained complexity index. The two
/// metadata columns (Noise, Intensity) are dropped at parse time.
#[derive(Debug, Clone)]
pub struct CorrelationTable {
    pub index_names: Vec<String>,
    /// Shape (n_observations, n_indices).
    pub observations: Array2<f64>,
}

impl CorrelationTable {
    pub fn n_observations(&self) -> usize {
        self.observations.nrows()
    }

    pub fn n_indices(&self) -> usize {
        self.observations.ncols()
    }

    /// View with one row per index and one column per observation. This is
    /// the orientation both the correlation routine and the clustering
    /// distance computation expect.
    pub fn index_major(&self) -> ArrayView2<'_, f64> {
        self.observations.t()
    }
}

// src/data_input/correlation_data.rs
