// src/plot_functions/plot_dendrogram.rs

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

use crate::constants::{
    COLOR_DENDROGRAM_TRUNK, DENDROGRAM_TARGET_GROUPS, FONT_SIZE_CHART_TITLE, FONT_SIZE_MAIN_TITLE,
    FONT_SIZE_TICK_LABEL, LINE_WIDTH_DENDROGRAM, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::data_analysis::clustering::{first_leaf, leaf_order, Merge};
use crate::plot_framework::{cluster_color, draw_unavailable_message};

/// Generates the Ward clustering dendrogram. Edges below the group cut are
/// colored by cluster, the joins above it in a neutral trunk color; leaf
/// labels are rotated under their positions.
pub fn plot_dendrogram(
    merges: &[Merge],
    index_names: &[String],
    assignment: &[usize],
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let n = index_names.len();

    let root_area =
        BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    if n < 2 || merges.len() != n - 1 || assignment.len() != n {
        draw_unavailable_message(
            &root_area,
            "All indices",
            "Dendrogram",
            "Merge tree/name shape mismatch",
        )?;
        root_area.present()?;
        println!("  Skipping dendrogram plot: shape mismatch.");
        return Ok(());
    }

    root_area.draw(&Text::new(
        format!(
            "Hierarchical clustering of complexity indices ({} groups)",
            DENDROGRAM_TARGET_GROUPS.min(n)
        ),
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;
    let margined_area = root_area.margin(50, 5, 5, 5);

    // Node layout: leaves on the baseline in traversal order, every join at
    // the midpoint of its children, at its merge height.
    let order = leaf_order(merges, n);
    let total_nodes = n + merges.len();
    let mut node_x = vec![0.0f64; total_nodes];
    let mut node_y = vec![0.0f64; total_nodes];
    for (slot, &leaf) in order.iter().enumerate() {
        node_x[leaf] = slot as f64 + 0.5;
    }
    let mut max_height = 0.0f64;
    for (idx, merge) in merges.iter().enumerate() {
        let id = n + idx;
        node_x[id] = 0.5 * (node_x[merge.left] + node_x[merge.right]);
        node_y[id] = merge.height;
        max_height = max_height.max(merge.height);
    }
    if max_height <= 0.0 {
        max_height = 1.0;
    }

    let mut chart = ChartBuilder::on(&margined_area)
        .caption(
            "Ward linkage on Euclidean distance",
            ("sans-serif", FONT_SIZE_CHART_TITLE),
        )
        .margin(5)
        .x_label_area_size(150)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..n as f64, 0f64..max_height * 1.08)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc("Linkage height")
        .y_labels(8)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_TICK_LABEL))
        .draw()?;

    // Merges below the cut belong to one of the displayed groups.
    let n_groups = DENDROGRAM_TARGET_GROUPS.min(n);
    let merges_below_cut = n - n_groups;

    for (idx, merge) in merges.iter().enumerate() {
        let id = n + idx;
        let color = if idx < merges_below_cut {
            cluster_color(assignment[first_leaf(merges, n, id)])
        } else {
            *COLOR_DENDROGRAM_TRUNK
        };
        chart.draw_series(std::iter::once(PathElement::new(
            vec![
                (node_x[merge.left], node_y[merge.left]),
                (node_x[merge.left], node_y[id]),
                (node_x[merge.right], node_y[id]),
                (node_x[merge.right], node_y[merge.right]),
            ],
            color.stroke_width(LINE_WIDTH_DENDROGRAM),
        )))?;
    }

    // Rotated leaf labels under the baseline, colored by group.
    // backend_coord yields absolute pixels, so the labels go on the root
    // area rather than a shifted sub-area.
    for (slot, &leaf) in order.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(slot as f64 + 0.5, 0.0));
        let label_style = ("sans-serif", FONT_SIZE_TICK_LABEL)
            .into_font()
            .color(&cluster_color(assignment[leaf]))
            .transform(FontTransform::Rotate90)
            .pos(Pos::new(HPos::Left, VPos::Center));
        root_area.draw(&Text::new(
            index_names[leaf].clone(),
            (px, py + 10),
            label_style,
        ))?;
    }

    root_area.present()?;
    println!("  Dendrogram plot saved as '{}'.", output_path.display());
    Ok(())
}
