// src/types.rs
// Type aliases to reduce complexity warnings

use std::collections::BTreeMap;

// Per-method length bands, keyed by method name. BTreeMap keeps the grouping
// deterministic across runs.
pub type MethodLengthBands = BTreeMap<String, Vec<crate::data_analysis::summary::LengthBandPoint>>;
