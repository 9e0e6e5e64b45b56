// src/data_input/timing_parser.rs

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data_input::timing_data::TimingRow;

/// Parses the computation-time CSV.
///
/// The three essential headers (`Method`, `Length`, `Duration`) are located
/// by name; any extra columns are ignored. Rows with a missing or
/// unparseable essential field are skipped with a warning, as are rows with
/// a negative duration.
pub fn parse_timing_file(input_file_path: &Path) -> Result<Vec<TimingRow>, Box<dyn Error>> {
    let target_headers = ["Method", "Length", "Duration"];

    let header_indices: Vec<Option<usize>>;

    // Read CSV header and map target headers to indices.
    {
        let file = File::open(input_file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));
        let header_record = reader.headers()?.clone();
        println!("Headers found in CSV: {:?}", header_record);

        header_indices = target_headers
            .iter()
            .map(|&target_header| header_record.iter().position(|h| h.trim() == target_header))
            .collect();

        println!("Header mapping status:");
        for (i, name) in target_headers.iter().enumerate() {
            let found = header_indices[i].is_some();
            println!("  '{}': {}", name, if found { "Found" } else { "Not Found" });
        }

        if header_indices.iter().any(|idx| idx.is_none()) {
            let missing: Vec<String> = target_headers
                .iter()
                .enumerate()
                .filter(|&(i, _)| header_indices[i].is_none())
                .map(|(_, name)| format!("'{}'", name))
                .collect();
            return Err(format!(
                "Error: Missing essential headers in computation-time table: {}. Aborting.",
                missing.join(", ")
            )
            .into());
        }
    } // File reader is dropped here

    // --- Data Reading and Storage ---
    let mut rows: Vec<TimingRow> = Vec::new();
    let mut skipped_rows = 0usize;
    println!("\nReading data rows...");
    {
        let file = File::open(input_file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        for (row_index, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    let get_field = |target_idx: usize| -> Option<&str> {
                        header_indices
                            .get(target_idx)
                            .and_then(|opt_csv_idx| opt_csv_idx.as_ref())
                            .and_then(|&csv_idx| record.get(csv_idx))
                    };

                    let method = match get_field(0) {
                        Some(m) if !m.is_empty() => m.to_string(),
                        _ => {
                            eprintln!(
                                "Warning: Skipping row {} due to missing 'Method'",
                                row_index + 1
                            );
                            skipped_rows += 1;
                            continue;
                        }
                    };
                    let length = match get_field(1).and_then(|v| v.parse::<f64>().ok()) {
                        // Some generators emit lengths as floats ("1000.0").
                        Some(l) if l.is_finite() && l >= 1.0 => l.round() as u32,
                        _ => {
                            eprintln!(
                                "Warning: Skipping row {} due to missing or invalid 'Length'",
                                row_index + 1
                            );
                            skipped_rows += 1;
                            continue;
                        }
                    };
                    let duration_s = match get_field(2).and_then(|v| v.parse::<f64>().ok()) {
                        Some(d) if d.is_finite() && d >= 0.0 => d,
                        Some(_) => {
                            eprintln!(
                                "Warning: Skipping row {} due to negative or non-finite 'Duration'",
                                row_index + 1
                            );
                            skipped_rows += 1;
                            continue;
                        }
                        None => {
                            eprintln!(
                                "Warning: Skipping row {} due to missing or invalid 'Duration'",
                                row_index + 1
                            );
                            skipped_rows += 1;
                            continue;
                        }
                    };

                    rows.push(TimingRow {
                        method,
                        length,
                        duration_s,
                    });
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Skipping row {} due to CSV read error: {}",
                        row_index + 1,
                        e
                    );
                    skipped_rows += 1;
                }
            }
        }
    } // File reader is dropped here

    println!(
        "Finished reading {} data rows ({} skipped).",
        rows.len(),
        skipped_rows
    );

    if rows.is_empty() {
        return Err("No valid data rows in computation-time table".into());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_valid_rows() {
        let file = write_csv(
            "Method,Length,Duration\n\
             SampEn,100,0.002\n\
             SampEn,1000,0.05\n\
             LZC,100,0.0004\n",
        );
        let rows = parse_timing_file(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].method, "SampEn");
        assert_eq!(rows[1].length, 1000);
        assert!((rows[2].duration_s - 0.0004).abs() < 1e-12);
    }

    #[test]
    fn skips_bad_rows() {
        let file = write_csv(
            "Method,Length,Duration\n\
             SampEn,100,0.002\n\
             ,100,0.001\n\
             LZC,abc,0.001\n\
             LZC,100,-1.0\n\
             LZC,100,oops\n",
        );
        let rows = parse_timing_file(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn ignores_extra_columns_and_order() {
        let file = write_csv(
            "Trial,Duration,Method,Length\n\
             1,0.01,HFD,500\n",
        );
        let rows = parse_timing_file(file.path()).unwrap();
        assert_eq!(rows[0].method, "HFD");
        assert_eq!(rows[0].length, 500);
    }

    #[test]
    fn missing_header_is_an_error() {
        let file = write_csv("Method,Length\nSampEn,100\n");
        let err = parse_timing_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("'Duration'"));
    }
}
