use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use escape_model::{EscapeError, MeasurementTable, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn csv_error(path: &Path, error: &csv::Error) -> EscapeError {
    EscapeError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Reads a measurement CSV file.
///
/// The first non-blank record is the header. Blank lines are skipped and short
/// records are padded with empty cells to the header width.
pub fn read_measurement_table(path: &Path) -> Result<MeasurementTable> {
    let file = std::fs::File::open(path).map_err(|e| EscapeError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let table = read_measurement_table_from(file, path)?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.len(),
        "read measurement table"
    );
    Ok(table)
}

/// Reads measurement CSV data from any reader; `path` is used for error reporting.
pub fn read_measurement_table_from<R: std::io::Read>(
    input: R,
    path: &Path,
) -> Result<MeasurementTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(header) = headers.as_ref() else {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        };
        let mut row = Vec::with_capacity(header.len());
        for idx in 0..header.len() {
            row.push(normalize_cell(record.get(idx).unwrap_or("")));
        }
        rows.push(row);
    }

    Ok(MeasurementTable::new(headers.unwrap_or_default(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_with_bom_and_blank_lines() {
        let data = "\u{feff}condition,site,wildtype,mutation,mut_escape\n\
                    C1,331,N,A,0.1\n\
                    \n\
                    C2,332,I,V\n";
        let table = read_measurement_table_from(data.as_bytes(), Path::new("data.csv")).unwrap();
        assert_eq!(table.headers[0], "condition");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["C2", "332", "I", "V", ""]);
    }

    #[test]
    fn test_read_empty_input() {
        let table = read_measurement_table_from("".as_bytes(), Path::new("data.csv")).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_quoted_cells_keep_commas() {
        let data = "condition,site\n\"C1, lot 2\",331\n";
        let table = read_measurement_table_from(data.as_bytes(), Path::new("data.csv")).unwrap();
        assert_eq!(table.rows[0][0], "C1, lot 2");
    }
}
