// src/main.rs

use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use complexity_bench_render::constants::{
    CORRELATION_FILE_NAME, REPORT_JSON_NAME, REPORT_MARKDOWN_NAME, TIMING_FILE_NAME,
};
use complexity_bench_render::pipeline::{run_correlation_pipeline, run_timing_pipeline};
use complexity_bench_render::report;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <data_dir> [output_dir]", args[0]);
        std::process::exit(1);
    }
    let data_dir = Path::new(&args[1]);
    let output_dir: PathBuf = if args.len() == 3 {
        PathBuf::from(&args[2])
    } else {
        data_dir.to_path_buf()
    };
    fs::create_dir_all(&output_dir)?;

    let timing_path = data_dir.join(TIMING_FILE_NAME);
    let correlation_path = data_dir.join(CORRELATION_FILE_NAME);

    if !timing_path.exists() && !correlation_path.exists() {
        return Err(format!(
            "Error: Neither '{}' nor '{}' found in '{}'. Aborting.",
            TIMING_FILE_NAME,
            CORRELATION_FILE_NAME,
            data_dir.display()
        )
        .into());
    }

    // Each pipeline runs only when its input file is present; a missing
    // file skips that half of the report rather than aborting the other.
    let timing = if timing_path.exists() {
        Some(run_timing_pipeline(&timing_path, &output_dir)?)
    } else {
        println!(
            "Note: '{}' not found, skipping computation-time report.",
            TIMING_FILE_NAME
        );
        None
    };

    let correlation = if correlation_path.exists() {
        Some(run_correlation_pipeline(&correlation_path, &output_dir)?)
    } else {
        println!(
            "Note: '{}' not found, skipping correlation report.",
            CORRELATION_FILE_NAME
        );
        None
    };

    println!("\n--- Writing Report ---");
    let summary = report::build_report(
        timing
            .as_ref()
            .map(|t| report::timing_section(&t.summaries, &t.figures)),
        correlation
            .as_ref()
            .map(|c| report::correlation_section(&c.index_names, &c.assignment, &c.figures)),
    );
    let markdown_path = output_dir.join(REPORT_MARKDOWN_NAME);
    let json_path = output_dir.join(REPORT_JSON_NAME);
    report::write_markdown(&summary, &markdown_path)?;
    report::write_json(&summary, &json_path)?;
    println!(
        "  Report saved as '{}' and '{}'.",
        markdown_path.display(),
        json_path.display()
    );

    Ok(())
}
