// src/plot_functions/plot_duration_violin.rs

use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

use crate::constants::{
    COLOR_MEDIAN_MARKER, COLOR_VIOLIN_BODY, FONT_SIZE_CHART_TITLE, FONT_SIZE_MAIN_TITLE,
    FONT_SIZE_TICK_LABEL, KDE_GRID_POINTS, PLOT_HEIGHT, PLOT_WIDTH, VIOLIN_HALF_WIDTH,
};
use crate::data_analysis::kde::gaussian_kde;
use crate::data_analysis::summary::median;
use crate::data_input::timing_data::TimingRow;
use crate::plot_framework::{draw_unavailable_message, facet_grid, format_duration_s};

type LengthGroups = BTreeMap<u32, Vec<f64>>;

fn draw_violin_facet(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    method: &str,
    groups: &LengthGroups,
) -> Result<(), Box<dyn Error>> {
    let lengths: Vec<u32> = groups.keys().copied().collect();
    let length_labels: Vec<String> = lengths.iter().map(|l| l.to_string()).collect();
    let n_slots = lengths.len();

    let y_max = groups
        .values()
        .flat_map(|d| d.iter().copied())
        .fold(f64::NEG_INFINITY, f64::max);
    if !y_max.is_finite() {
        draw_unavailable_message(area, method, "Duration Violin", "No data points")?;
        return Ok(());
    }
    let y_hi = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(method, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.7f64..(n_slots as f64 - 0.3), 0f64..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Signal length")
        .y_desc("Duration")
        .x_labels(n_slots.max(2))
        .y_labels(5)
        .x_label_formatter(&|x| {
            let slot = x.round();
            if (x - slot).abs() < 0.25 && slot >= 0.0 && (slot as usize) < length_labels.len() {
                length_labels[slot as usize].clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|v| format_duration_s(*v))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_TICK_LABEL))
        .draw()?;

    let body_color = *COLOR_VIOLIN_BODY;
    let median_color = *COLOR_MEDIAN_MARKER;

    for (slot, length) in lengths.iter().enumerate() {
        let durations = &groups[length];
        let x_center = slot as f64;
        let group_median = median(durations);

        match gaussian_kde(durations, KDE_GRID_POINTS) {
            Some(curve) => {
                let peak = curve.max_density();
                if peak <= 0.0 {
                    continue;
                }
                // Mirror the density around the slot center; the violin is
                // clipped at zero since durations cannot be negative.
                let mut outline: Vec<(f64, f64)> = curve
                    .grid
                    .iter()
                    .zip(curve.density.iter())
                    .map(|(&y, &d)| (x_center + VIOLIN_HALF_WIDTH * d / peak, y.max(0.0)))
                    .collect();
                outline.extend(
                    curve
                        .grid
                        .iter()
                        .zip(curve.density.iter())
                        .rev()
                        .map(|(&y, &d)| (x_center - VIOLIN_HALF_WIDTH * d / peak, y.max(0.0))),
                );

                chart.draw_series(std::iter::once(Polygon::new(
                    outline.clone(),
                    body_color.mix(0.35).filled(),
                )))?;
                outline.push(outline[0]);
                chart.draw_series(std::iter::once(PathElement::new(
                    outline,
                    body_color.stroke_width(1),
                )))?;
            }
            None => {
                // Too few or constant-valued trials; a tick marks the group.
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![
                        (x_center - VIOLIN_HALF_WIDTH / 2.0, group_median),
                        (x_center + VIOLIN_HALF_WIDTH / 2.0, group_median),
                    ],
                    body_color.stroke_width(2),
                )))?;
            }
        }

        chart.draw_series(std::iter::once(Circle::new(
            (x_center, group_median),
            3,
            median_color.filled(),
        )))?;
    }

    Ok(())
}

/// Generates the duration-vs-length violin plot, one facet per method: a
/// kernel-density violin per signal length with the group median marked.
pub fn plot_duration_violin(
    rows: &[TimingRow],
    method_order: &[String],
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut per_method: BTreeMap<&str, LengthGroups> = BTreeMap::new();
    for row in rows {
        per_method
            .entry(row.method.as_str())
            .or_default()
            .entry(row.length)
            .or_default()
            .push(row.duration_s);
    }

    let root_area =
        BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if method_order.is_empty() {
        draw_unavailable_message(&root_area, "All methods", "Duration Violin", "No methods")?;
        root_area.present()?;
        println!("  Skipping violin plot: no methods.");
        return Ok(());
    }

    root_area.draw(&Text::new(
        "Computation time distribution by signal length",
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;
    let margined_area = root_area.margin(50, 5, 5, 5);

    let (grid_rows, grid_cols) = facet_grid(method_order.len());
    let facet_areas = margined_area.split_evenly((grid_rows, grid_cols));

    for (facet_idx, method) in method_order.iter().enumerate() {
        let area = &facet_areas[facet_idx];
        match per_method.get(method.as_str()) {
            Some(groups) if !groups.is_empty() => {
                draw_violin_facet(area, method, groups)?;
            }
            _ => {
                println!(
                    "  INFO: No violin data available for method '{}'. Drawing placeholder.",
                    method
                );
                draw_unavailable_message(area, method, "Duration Violin", "No data points")?;
            }
        }
    }

    root_area.present()?;
    println!("  Violin plot saved as '{}'.", output_path.display());
    Ok(())
}
