// src/data_input/correlation_parser.rs

use csv::ReaderBuilder;
use ndarray::Array2;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::constants::EXCLUDED_CORRELATION_COLUMNS;
use crate::data_input::correlation_data::CorrelationTable;

/// Parses the correlations CSV into a dense observation matrix.
///
/// All columns except the excluded metadata columns are treated as complexity
/// indices and must parse as numeric. Rows containing a missing or non-finite
/// value in a retained column are dropped whole, with a warning.
pub fn parse_correlation_file(input_file_path: &Path) -> Result<CorrelationTable, Box<dyn Error>> {
    let file = File::open(input_file_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header_record = reader.headers()?.clone();
    println!("Headers found in CSV: {:?}", header_record);

    let mut index_names: Vec<String> = Vec::new();
    let mut retained_csv_indices: Vec<usize> = Vec::new();
    for (csv_idx, header) in header_record.iter().enumerate() {
        let name = header.trim();
        if name.is_empty() {
            continue;
        }
        if EXCLUDED_CORRELATION_COLUMNS.contains(&name) {
            println!("  '{}': Excluded (metadata)", name);
            continue;
        }
        index_names.push(name.to_string());
        retained_csv_indices.push(csv_idx);
    }

    if index_names.len() < 2 {
        return Err(format!(
            "Error: Correlation table needs at least two index columns, found {}. Aborting.",
            index_names.len()
        )
        .into());
    }
    println!("Retained {} index columns.", index_names.len());

    let n_indices = index_names.len();
    let mut values: Vec<f64> = Vec::new();
    let mut n_rows = 0usize;
    let mut skipped_rows = 0usize;

    println!("\nReading data rows...");
    for (row_index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let mut row_values: Vec<f64> = Vec::with_capacity(n_indices);
                let mut row_ok = true;
                for &csv_idx in &retained_csv_indices {
                    match record.get(csv_idx).and_then(|v| v.parse::<f64>().ok()) {
                        Some(v) if v.is_finite() => row_values.push(v),
                        _ => {
                            row_ok = false;
                            break;
                        }
                    }
                }
                if row_ok {
                    values.extend_from_slice(&row_values);
                    n_rows += 1;
                } else {
                    eprintln!(
                        "Warning: Skipping row {} due to missing or non-numeric index value",
                        row_index + 1
                    );
                    skipped_rows += 1;
                }
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

    println!(
        "Finished reading {} observation rows ({} skipped).",
        n_rows, skipped_rows
    );

    if n_rows < 2 {
        return Err("Correlation table needs at least two complete observation rows".into());
    }

    let observations = Array2::from_shape_vec((n_rows, n_indices), values)?;
    Ok(CorrelationTable {
        index_names,
        observations,
    })
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
    fn drops_metadata_columns() {
        let file = write_csv(
            "Noise,Intensity,SampEn,LZC\n\
             0.1,1.0,0.5,0.6\n\
             0.2,2.0,0.7,0.8\n",
        );
        let table = parse_correlation_file(file.path()).unwrap();
        assert_eq!(table.index_names, vec!["SampEn", "LZC"]);
        assert_eq!(table.n_observations(), 2);
        assert_eq!(table.n_indices(), 2);
        assert!((table.observations[[1, 0]] - 0.7).abs() < 1e-12);
    }

    #[test]
    fn listwise_deletion_of_incomplete_rows() {
        let file = write_csv(
            "SampEn,LZC,HFD\n\
             0.5,0.6,1.2\n\
             0.7,,1.3\n\
             0.9,0.8,1.4\n\
             0.9,NaN,1.4\n",
        );
        let table = parse_correlation_file(file.path()).unwrap();
        assert_eq!(table.n_observations(), 2);
    }

    #[test]
    fn too_few_index_columns_is_an_error() {
        let file = write_csv("Noise,Intensity,SampEn\n0.1,1.0,0.5\n0.2,2.0,0.7\n");
        assert!(parse_correlation_file(file.path()).is_err());
    }

    #[test]
    fn index_major_orientation() {
        let file = write_csv(
            "SampEn,LZC\n\
             1.0,10.0\n\
             2.0,20.0\n\
             3.0,30.0\n",
        );
        let table = parse_correlation_file(file.path()).unwrap();
        let by_index = table.index_major();
        assert_eq!(by_index.nrows(), 2); // indices
        assert_eq!(by_index.ncols(), 3); // observations
        assert!((by_index[[1, 2]] - 30.0).abs() < 1e-12);
    }
}
