// src/data_analysis/kde.rs

use crate::data_analysis::summary::std_dev;

/// A density estimate evaluated on an ascending grid. `density` integrates
/// to ~1 over the grid span.
#[derive(Debug, Clone)]
pub struct DensityCurve {
    pub grid: Vec<f64>,
    pub density: Vec<f64>,
}

impl DensityCurve {
    pub fn max_density(&self) -> f64 {
        self.density.iter().cloned().fold(0.0, f64::max)
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    // Linear interpolation between nearest ranks; expects sorted input.
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let fraction = rank - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Silverman's rule-of-thumb bandwidth: 0.9 * min(sd, IQR/1.34) * n^(-1/5).
/// Falls back to the standard deviation when the IQR collapses to zero.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sd = std_dev(values);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
    let spread = if iqr > 0.0 { sd.min(iqr / 1.34) } else { sd };
    0.9 * spread * (values.len() as f64).powf(-0.2)
}

/// Gaussian kernel density estimate over `grid_points` evenly spaced points
/// spanning the data range widened by three bandwidths.
///
/// Returns `None` when a density cannot be estimated (fewer than two values,
/// or all values identical); the violin plot falls back to a median tick in
/// that case.
pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Option<DensityCurve> {
    if values.len() < 2 || grid_points < 2 {
        return None;
    }
    let bandwidth = silverman_bandwidth(values);
    if !(bandwidth > 0.0) {
        return None;
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 3.0 * bandwidth;
    let hi = max + 3.0 * bandwidth;
    let step = (hi - lo) / (grid_points - 1) as f64;

    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let mut grid = Vec::with_capacity(grid_points);
    let mut density = Vec::with_capacity(grid_points);
    for i in 0..grid_points {
        let x = lo + step * i as f64;
        let mut sum = 0.0;
        for &v in values {
            let z = (x - v) / bandwidth;
            sum += (-0.5 * z * z).exp();
        }
        grid.push(x);
        density.push(norm * sum);
    }

    Some(DensityCurve { grid, density })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandwidth_positive_for_spread_data() {
        let values = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.9, 1.3];
        assert!(silverman_bandwidth(&values) > 0.0);
    }

    #[test]
    fn bandwidth_zero_for_constant_data() {
        let values = vec![0.5, 0.5, 0.5, 0.5];
        assert!(silverman_bandwidth(&values) == 0.0);
        assert!(gaussian_kde(&values, 64).is_none());
    }

    #[test]
    fn density_peaks_near_the_mode() {
        let values = vec![1.0, 1.1, 0.9, 1.05, 0.95, 5.0];
        let curve = gaussian_kde(&values, 200).unwrap();
        let peak_idx = curve
            .density
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap();
        let peak_x = curve.grid[peak_idx];
        assert!((peak_x - 1.0).abs() < 0.5, "peak at {}", peak_x);
    }

    #[test]
    fn density_approximately_integrates_to_one() {
        let values = vec![0.2, 0.4, 0.45, 0.6, 0.8, 1.2, 1.5];
        let curve = gaussian_kde(&values, 400).unwrap();
        let step = curve.grid[1] - curve.grid[0];
        let integral: f64 = curve.density.iter().sum::<f64>() * step;
        assert!((integral - 1.0).abs() < 0.05, "integral {}", integral);
    }

    #[test]
    fn grid_is_ascending_and_sized() {
        let values = vec![1.0, 2.0, 3.0];
        let curve = gaussian_kde(&values, 64).unwrap();
        assert_eq!(curve.grid.len(), 64);
        assert_eq!(curve.density.len(), 64);
        for pair in curve.grid.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
