// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::Text;
use plotters::style::colors::RED;
use plotters::style::{IntoFont, RGBColor};

use std::error::Error;

use crate::constants::{CLUSTER_COLORS, FONT_SIZE_MESSAGE};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Grid shape for `n` facets: near-square, favoring wider layouts since the
/// canvas is landscape.
pub fn facet_grid(n: usize) -> (usize, usize) {
    if n == 0 {
        return (1, 1);
    }
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);
    (rows, cols)
}

/// Format a duration in seconds for an axis label, switching units so small
/// values stay readable.
pub fn format_duration_s(seconds: f64) -> String {
    let abs = seconds.abs();
    if abs >= 1.0 {
        format!("{:.1} s", seconds)
    } else if abs >= 1e-3 {
        format!("{:.1} ms", seconds * 1e3)
    } else if abs > 0.0 {
        format!("{:.0} \u{00b5}s", seconds * 1e6)
    } else {
        "0".to_string()
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    facet_name: &str,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    let (width, height) = area.dim_in_pixel();
    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(
        format!("{} {} Data Unavailable:\n{}", facet_name, plot_type, reason),
        (width as i32 / 2 - 150, height as i32 / 2 - 20),
        text_style,
    ))?;
    Ok(())
}

/// Diverging color for a correlation coefficient in [-1, 1]: strong positive
/// maps to the red end, strong negative to the blue end.
pub fn correlation_color(r: f64) -> RGBColor {
    let t = ((1.0 - r.clamp(-1.0, 1.0)) / 2.0).clamp(0.0, 1.0);
    let color = colorous::RED_BLUE.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

/// Stable color for a dendrogram cluster group.
pub fn cluster_color(group: usize) -> RGBColor {
    CLUSTER_COLORS[group % CLUSTER_COLORS.len()]
}
