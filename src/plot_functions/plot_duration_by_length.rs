// src/plot_functions/plot_duration_by_length.rs

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::constants::{
    FONT_SIZE_CHART_TITLE, FONT_SIZE_MAIN_TITLE, FONT_SIZE_TICK_LABEL, METHOD_SERIES_COLORS,
    PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::data_analysis::summary::LengthBandPoint;
use crate::plot_framework::{calculate_range, draw_unavailable_message, facet_grid, format_duration_s};
use crate::types::MethodLengthBands;

fn draw_length_facet(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    method: &str,
    points: &[LengthBandPoint],
    series_color: RGBColor,
) -> Result<(), Box<dyn Error>> {
    let x_min = points.iter().map(|p| p.length).min().unwrap_or(1).max(1) as f64;
    let x_max = points.iter().map(|p| p.length).max().unwrap_or(1) as f64;
    // Padding keeps a single-length facet from producing a degenerate log range.
    let (x_lo, x_hi) = (x_min * 0.8, x_max * 1.25);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in points {
        y_min = y_min.min(p.band_lower_s);
        y_max = y_max.max(p.band_upper_s);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        draw_unavailable_message(area, method, "Duration/Length", "No finite band values")?;
        return Ok(());
    }
    let (y_lo, y_hi) = calculate_range(y_min, y_max);
    let y_lo = y_lo.max(0.0);

    let mut chart = ChartBuilder::on(area)
        .caption(method, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Signal length")
        .y_desc("Duration")
        .x_labels(6)
        .y_labels(5)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|v| format_duration_s(*v))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_TICK_LABEL))
        .draw()?;

    // Median +/- SD band, lower bound already clamped at zero upstream.
    let mut band: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.length as f64, p.band_upper_s))
        .collect();
    band.extend(
        points
            .iter()
            .rev()
            .map(|p| (p.length as f64, p.band_lower_s)),
    );
    chart.draw_series(std::iter::once(Polygon::new(
        band,
        series_color.mix(0.25).filled(),
    )))?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|p| (p.length as f64, p.median_s)),
        series_color.stroke_width(2),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new((p.length as f64, p.median_s), 4, series_color.filled())),
    )?;

    Ok(())
}

/// Generates the duration-vs-signal-length chart, one facet per method:
/// median duration per length with the clamped median +/- SD band.
pub fn plot_duration_by_length(
    bands: &MethodLengthBands,
    method_order: &[String],
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let root_area =
        BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if method_order.is_empty() {
        draw_unavailable_message(&root_area, "All methods", "Duration/Length", "No methods")?;
        root_area.present()?;
        println!("  Skipping duration-by-length plot: no methods.");
        return Ok(());
    }

    root_area.draw(&Text::new(
        "Computation time by signal length",
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;
    let margined_area = root_area.margin(50, 5, 5, 5);

    let (grid_rows, grid_cols) = facet_grid(method_order.len());
    let facet_areas = margined_area.split_evenly((grid_rows, grid_cols));

    for (facet_idx, method) in method_order.iter().enumerate() {
        let area = &facet_areas[facet_idx];
        let series_color = METHOD_SERIES_COLORS[facet_idx % METHOD_SERIES_COLORS.len()];
        match bands.get(method) {
            Some(points) if !points.is_empty() => {
                draw_length_facet(area, method, points, series_color)?;
            }
            _ => {
                println!(
                    "  INFO: No length data available for method '{}'. Drawing placeholder.",
                    method
                );
                draw_unavailable_message(area, method, "Duration/Length", "No data points")?;
            }
        }
    }

    root_area.present()?;
    println!(
        "  Duration-by-length plot saved as '{}'.",
        output_path.display()
    );
    Ok(())
}
