// src/plot_functions/plot_duration_by_method.rs

use plotters::prelude::*;
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use crate::constants::{
    COLOR_MEDIAN_MARKER, COLOR_SCATTER_POINT, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_TICK_LABEL, MEDIAN_TICK_HALF_WIDTH, PLOT_HEIGHT, PLOT_WIDTH,
    SCATTER_FAN_WIDTH, SCATTER_POINT_SIZE,
};
use crate::data_analysis::summary::MethodSummary;
use crate::data_input::timing_data::TimingRow;
use crate::plot_framework::{draw_unavailable_message, format_duration_s};

/// Generates the duration-vs-method scatter: every trial as a point, one
/// column per method ordered ascending by median, duration on a log axis,
/// with the per-method median drawn as a tick.
pub fn plot_duration_by_method(
    rows: &[TimingRow],
    summaries: &[MethodSummary],
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let method_names: Vec<String> = summaries.iter().map(|s| s.method.clone()).collect();
    let slot_of: HashMap<&str, usize> = method_names
        .iter()
        .enumerate()
        .map(|(slot, name)| (name.as_str(), slot))
        .collect();

    // Log axis: only strictly positive durations are plottable.
    let mut points: Vec<(f64, f64)> = Vec::new();
    let mut trial_counter: HashMap<&str, usize> = HashMap::new();
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for row in rows {
        if row.duration_s <= 0.0 {
            continue;
        }
        if let Some(&slot) = slot_of.get(row.method.as_str()) {
            let trial = trial_counter.entry(row.method.as_str()).or_insert(0);
            // Deterministic fan-out within the column, so repeated renders
            // of the same data are pixel-identical.
            let fan = ((*trial % 13) as f64 / 12.0 - 0.5) * SCATTER_FAN_WIDTH;
            *trial += 1;
            points.push((slot as f64 + fan, row.duration_s));
            y_min = y_min.min(row.duration_s);
            y_max = y_max.max(row.duration_s);
        }
    }

    let root_area =
        BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if points.is_empty() {
        draw_unavailable_message(&root_area, "All methods", "Computation Time", "No positive durations")?;
        root_area.present()?;
        println!("  Skipping duration-by-method plot: no plottable durations.");
        return Ok(());
    }

    root_area.draw(&Text::new(
        "Computation time by method",
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;
    let margined_area = root_area.margin(50, 5, 5, 5);

    let n_methods = method_names.len();
    let x_range = -0.5f64..(n_methods as f64 - 0.5);
    let y_range = (y_min * 0.8)..(y_max * 1.25);

    let mut chart = ChartBuilder::on(&margined_area)
        .caption(
            "Median-ordered, all trials, log scale",
            ("sans-serif", FONT_SIZE_CHART_TITLE),
        )
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range.log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Method")
        .y_desc("Duration")
        .x_labels(n_methods.max(2))
        .y_labels(8)
        .x_label_formatter(&|x| {
            let slot = x.round();
            if (x - slot).abs() < 0.25 && slot >= 0.0 && (slot as usize) < method_names.len() {
                method_names[slot as usize].clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|v| format_duration_s(*v))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_TICK_LABEL))
        .draw()?;

    let point_color = *COLOR_SCATTER_POINT;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), SCATTER_POINT_SIZE, point_color.mix(0.35).filled())),
        )?
        .label("Trial")
        .legend(move |(x, y)| Circle::new((x + 10, y), 3, point_color.filled()));

    let median_color = *COLOR_MEDIAN_MARKER;
    chart
        .draw_series(summaries.iter().enumerate().filter(|(_, s)| s.median_s > 0.0).map(
            |(slot, s)| {
                PathElement::new(
                    vec![
                        (slot as f64 - MEDIAN_TICK_HALF_WIDTH, s.median_s),
                        (slot as f64 + MEDIAN_TICK_HALF_WIDTH, s.median_s),
                    ],
                    median_color.stroke_width(3),
                )
            },
        ))?
        .label("Median")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], median_color.stroke_width(3))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    root_area.present()?;
    println!(
        "  Duration-by-method plot saved as '{}'.",
        output_path.display()
    );
    Ok(())
}
