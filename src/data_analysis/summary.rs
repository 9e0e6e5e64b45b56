// src/data_analysis/summary.rs

use std::collections::BTreeMap;

use crate::data_input::timing_data::TimingRow;
use crate::types::MethodLengthBands;

/// Per-method timing summary across all lengths and trials.
#[derive(Debug, Clone)]
pub struct MethodSummary {
    pub method: String,
    pub trials: usize,
    pub median_s: f64,
    pub mean_s: f64,
    pub std_dev_s: f64,
    pub min_s: f64,
    pub max_s: f64,
}

/// Aggregated duration at one (method, length) group: the plotted point plus
/// the median +/- standard-deviation band, lower bound clamped at zero.
#[derive(Debug, Clone)]
pub struct LengthBandPoint {
    pub length: u32,
    pub trials: usize,
    pub median_s: f64,
    pub band_lower_s: f64,
    pub band_upper_s: f64,
}

/// Median via sort and midpoint interpolation. Returns 0.0 for an empty
/// slice so callers can treat absent groups uniformly.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n-1). Returns 0.0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Groups durations per method and computes the per-method summaries, sorted
/// ascending by median duration. This ordering is also the display ordering
/// of the by-method scatter plot.
pub fn summarize_methods(rows: &[TimingRow]) -> Vec<MethodSummary> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in rows {
        grouped.entry(&row.method).or_default().push(row.duration_s);
    }

    let mut summaries: Vec<MethodSummary> = grouped
        .into_iter()
        .map(|(method, durations)| {
            let mean_s = durations.iter().sum::<f64>() / durations.len() as f64;
            let min_s = durations.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_s = durations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            MethodSummary {
                method: method.to_string(),
                trials: durations.len(),
                median_s: median(&durations),
                mean_s,
                std_dev_s: std_dev(&durations),
                min_s,
                max_s,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        a.median_s
            .partial_cmp(&b.median_s)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.method.cmp(&b.method))
    });
    summaries
}

/// Groups durations per (method, length) and computes the median band for
/// the by-length chart. The lower band bound is clamped at zero; a negative
/// lower duration estimate is a presentation artifact, not data.
pub fn summarize_method_lengths(rows: &[TimingRow]) -> MethodLengthBands {
    let mut grouped: BTreeMap<(String, u32), Vec<f64>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry((row.method.clone(), row.length))
            .or_default()
            .push(row.duration_s);
    }

    let mut bands: MethodLengthBands = BTreeMap::new();
    for ((method, length), durations) in grouped {
        let median_s = median(&durations);
        let sd = std_dev(&durations);
        bands.entry(method).or_default().push(LengthBandPoint {
            length,
            trials: durations.len(),
            median_s,
            band_lower_s: (median_s - sd).max(0.0),
            band_upper_s: median_s + sd,
        });
    }
    // BTreeMap grouping already visits lengths in ascending order per method.
    bands
}

/// Display order of methods: ascending by median duration.
pub fn method_order(summaries: &[MethodSummary]) -> Vec<String> {
    summaries.iter().map(|s| s.method.clone()).collect()
}
