// tests/timing_report_test.rs
//
// End-to-end checks of the timing half of the report, short of pixel
// rendering: CSV fixture -> parser -> aggregation -> report document.

use std::fs;

use complexity_bench_render::data_analysis::summary::{
    method_order, summarize_method_lengths, summarize_methods,
};
use complexity_bench_render::data_input::timing_parser::parse_timing_file;
use complexity_bench_render::report;

fn write_timing_fixture(dir: &std::path::Path) -> std::path::PathBuf {
    let mut csv = String::from("Method,Length,Duration\n");
    // Three methods with clearly separated magnitudes; five trials per
    // (method, length) pair, two lengths each.
    let methods: [(&str, f64); 3] = [("LZC", 1e-4), ("SampEn", 1e-2), ("MSE", 0.5)];
    for (method, base) in methods {
        for length in [100u32, 1000] {
            let scale = length as f64 / 100.0;
            for trial in 0..5 {
                let duration = base * scale * (1.0 + 0.1 * trial as f64);
                csv.push_str(&format!("{},{},{}\n", method, length, duration));
            }
        }
    }
    let path = dir.join("data_ComputationTime.csv");
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn parses_and_orders_methods_by_median() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_timing_fixture(dir.path());

    let rows = parse_timing_file(&path).unwrap();
    assert_eq!(rows.len(), 30);

    let summaries = summarize_methods(&rows);
    let order = method_order(&summaries);
    assert_eq!(order, vec!["LZC", "SampEn", "MSE"]);

    // Plotted ordering is ascending in median.
    for pair in summaries.windows(2) {
        assert!(pair[0].median_s <= pair[1].median_s);
    }
}

#[test]
fn band_lower_bounds_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_timing_fixture(dir.path());

    let rows = parse_timing_file(&path).unwrap();
    let bands = summarize_method_lengths(&rows);
    assert_eq!(bands.len(), 3);
    for points in bands.values() {
        assert_eq!(points.len(), 2);
        for point in points {
            assert!(point.band_lower_s >= 0.0);
            assert!(point.band_upper_s >= point.median_s);
            assert!(point.median_s > 0.0);
        }
    }
}

#[test]
fn report_document_lists_all_methods() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_timing_fixture(dir.path());

    let rows = parse_timing_file(&path).unwrap();
    let summaries = summarize_methods(&rows);
    let figures = vec!["ComputationTime_by_method.png".to_string()];
    let summary = report::build_report(Some(report::timing_section(&summaries, &figures)), None);

    let md_path = dir.path().join("report.md");
    let json_path = dir.path().join("report.json");
    report::write_markdown(&summary, &md_path).unwrap();
    report::write_json(&summary, &json_path).unwrap();

    let md = fs::read_to_string(&md_path).unwrap();
    for method in ["LZC", "SampEn", "MSE"] {
        assert!(md.contains(method), "missing method {} in markdown", method);
    }
    assert!(md.contains("![ComputationTime_by_method.png]"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["timing"]["methods"][0]["method"], "LZC");
    assert!(value["correlation"].is_null());
}
