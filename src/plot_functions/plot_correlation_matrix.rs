// src/plot_functions/plot_correlation_matrix.rs

use ndarray::Array2;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

use crate::constants::{
    FONT_SIZE_CELL_LABEL, FONT_SIZE_MAIN_TITLE, FONT_SIZE_TICK_LABEL, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::plot_framework::{correlation_color, draw_unavailable_message};

const COLORBAR_WIDTH_PX: u32 = 110;
const COLORBAR_STEPS: usize = 100;
const CELL_GAP: f64 = 0.02;

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
) -> Result<(), Box<dyn Error>> {
    let (_, height) = area.dim_in_pixel();
    let bar_x0 = 20i32;
    let bar_x1 = 45i32;
    let bar_top = 60i32;
    let bar_bottom = height as i32 - 60;
    let bar_span = (bar_bottom - bar_top).max(1);

    for step in 0..COLORBAR_STEPS {
        // Top of the bar is +1, bottom is -1.
        let r = 1.0 - 2.0 * (step as f64 + 0.5) / COLORBAR_STEPS as f64;
        let y0 = bar_top + (step as i32 * bar_span) / COLORBAR_STEPS as i32;
        let y1 = bar_top + ((step as i32 + 1) * bar_span) / COLORBAR_STEPS as i32;
        area.draw(&Rectangle::new(
            [(bar_x0, y0), (bar_x1, y1)],
            correlation_color(r).filled(),
        ))?;
    }
    area.draw(&Rectangle::new(
        [(bar_x0, bar_top), (bar_x1, bar_bottom)],
        BLACK.stroke_width(1),
    ))?;

    let label_style = ("sans-serif", FONT_SIZE_TICK_LABEL)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    area.draw(&Text::new("+1", (bar_x1 + 8, bar_top), label_style.clone()))?;
    area.draw(&Text::new(
        "0",
        (bar_x1 + 8, (bar_top + bar_bottom) / 2),
        label_style.clone(),
    ))?;
    area.draw(&Text::new("-1", (bar_x1 + 8, bar_bottom), label_style))?;
    Ok(())
}

/// Generates the correlation-matrix heatmap: one colored cell per index
/// pair, the coefficient printed in each cell, a diverging colorbar on the
/// right.
pub fn plot_correlation_matrix(
    matrix: &Array2<f64>,
    index_names: &[String],
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let n = index_names.len();

    let root_area =
        BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if n == 0 || matrix.nrows() != n || matrix.ncols() != n {
        draw_unavailable_message(
            &root_area,
            "All indices",
            "Correlation Matrix",
            "Matrix/name shape mismatch",
        )?;
        root_area.present()?;
        println!("  Skipping correlation matrix plot: shape mismatch.");
        return Ok(());
    }

    root_area.draw(&Text::new(
        "Correlation between complexity indices",
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;

    let (matrix_area, bar_area) = root_area
        .margin(50, 5, 5, 5)
        .split_horizontally(PLOT_WIDTH - COLORBAR_WIDTH_PX);

    // Label gutters are drawn manually, so the chart carries no mesh.
    let chart = ChartBuilder::on(&matrix_area)
        .margin(10)
        .x_label_area_size(0)
        .y_label_area_size(160)
        .build_cartesian_2d(0f64..n as f64, 0f64..(n as f64 + 1.2))?;

    let cell_label_style_dark = ("sans-serif", FONT_SIZE_CELL_LABEL)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let cell_label_style_light = ("sans-serif", FONT_SIZE_CELL_LABEL)
        .into_font()
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for row in 0..n {
        // Row 0 is drawn at the top.
        let y_base = (n - 1 - row) as f64;
        for col in 0..n {
            let r = matrix[[row, col]];
            chart.plotting_area().draw(&Rectangle::new(
                [
                    (col as f64 + CELL_GAP, y_base + CELL_GAP),
                    (col as f64 + 1.0 - CELL_GAP, y_base + 1.0 - CELL_GAP),
                ],
                correlation_color(r).filled(),
            ))?;

            let style = if r.abs() > 0.6 {
                cell_label_style_light.clone()
            } else {
                cell_label_style_dark.clone()
            };
            chart.plotting_area().draw(&Text::new(
                format!("{:.2}", r),
                (col as f64 + 0.5, y_base + 0.5),
                style,
            ))?;
        }
    }

    // Column headers above the grid, row labels in the left gutter.
    let header_style = ("sans-serif", FONT_SIZE_TICK_LABEL)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for (col, name) in index_names.iter().enumerate() {
        chart.plotting_area().draw(&Text::new(
            name.clone(),
            (col as f64 + 0.5, n as f64 + 0.9),
            header_style.clone(),
        ))?;
    }

    // backend_coord yields absolute pixels, so the gutter labels go on the
    // root area rather than a shifted sub-area.
    let row_label_style = ("sans-serif", FONT_SIZE_TICK_LABEL)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (row, name) in index_names.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(0.0, (n - 1 - row) as f64 + 0.5));
        root_area.draw(&Text::new(
            name.clone(),
            (px - 8, py),
            row_label_style.clone(),
        ))?;
    }

    draw_colorbar(&bar_area)?;

    root_area.present()?;
    println!(
        "  Correlation matrix plot saved as '{}'.",
        output_path.display()
    );
    Ok(())
}
