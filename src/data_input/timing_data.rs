// src/data_input/timing_data.rs

/// One parsed row of the computation-time table: a single timed trial of one
/// complexity method on one signal length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    pub method: String,
    pub length: u32,
    pub duration_s: f64,
}

// src/data_input/timing_data.rs
