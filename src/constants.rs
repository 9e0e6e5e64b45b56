// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{
    AMBER, GREEN, GREY, INDIGO, LIGHTBLUE, ORANGE, PINK, PURPLE, RED, TEAL,
};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Input file names expected inside the data directory.
pub const TIMING_FILE_NAME: &str = "data_ComputationTime.csv";
pub const CORRELATION_FILE_NAME: &str = "data_Correlations.csv";

// Output file names.
pub const FIG_TIME_BY_METHOD: &str = "ComputationTime_by_method.png";
pub const FIG_TIME_BY_LENGTH: &str = "ComputationTime_by_length.png";
pub const FIG_TIME_VIOLIN: &str = "ComputationTime_violin.png";
pub const FIG_CORRELATION_MATRIX: &str = "Correlation_matrix.png";
pub const FIG_DENDROGRAM: &str = "Correlation_dendrogram.png";
pub const REPORT_MARKDOWN_NAME: &str = "report.md";
pub const REPORT_JSON_NAME: &str = "report.json";

// Metadata columns excluded from the correlation analysis.
pub const EXCLUDED_CORRELATION_COLUMNS: [&str; 2] = ["Noise", "Intensity"];

// Number of groups the dendrogram is cut into for display.
pub const DENDROGRAM_TARGET_GROUPS: usize = 4;

// Violin density estimation.
pub const KDE_GRID_POINTS: usize = 160;
pub const VIOLIN_HALF_WIDTH: f64 = 0.42;

// Horizontal fan-out of scatter points within a method column. Deterministic
// so repeated renders of the same data are identical.
pub const SCATTER_FAN_WIDTH: f64 = 0.55;

// --- Plot Color Assignments ---
pub const COLOR_SCATTER_POINT: &RGBColor = &LIGHTBLUE;
pub const COLOR_MEDIAN_MARKER: &RGBColor = &RED;
pub const COLOR_VIOLIN_BODY: &RGBColor = &TEAL;

// Method series colors for the by-length chart cycle through this palette.
pub const METHOD_SERIES_COLORS: [RGBColor; 8] =
    [LIGHTBLUE, ORANGE, GREEN, PURPLE, AMBER, TEAL, PINK, INDIGO];

// Dendrogram cluster colors; edges above the cut use COLOR_DENDROGRAM_TRUNK.
pub const CLUSTER_COLORS: [RGBColor; 6] = [LIGHTBLUE, ORANGE, GREEN, PURPLE, AMBER, PINK];
pub const COLOR_DENDROGRAM_TRUNK: &RGBColor = &GREY;

// Stroke widths for lines
pub const LINE_WIDTH_DENDROGRAM: u32 = 2;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const FONT_SIZE_MESSAGE: i32 = 20;
pub const FONT_SIZE_CELL_LABEL: i32 = 12;
pub const FONT_SIZE_TICK_LABEL: i32 = 14;

// Scatter/median marker geometry.
pub const SCATTER_POINT_SIZE: u32 = 2;
pub const MEDIAN_TICK_HALF_WIDTH: f64 = 0.3;

// src/constants.rs
