use std::path::Path;

use csv::ReaderBuilder;
use fnreview_model::DocumentTable;

use crate::error::{IngestError, Result};

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Reads a CSV file as one table; the first non-empty row is the header.
///
/// Delimiters `,` and `;` are both accepted; the one found more often in the
/// first line wins. Fully empty rows are skipped. Short rows are padded to the
/// header width, and trailing empty cells beyond it are dropped.
pub fn read_csv_table(path: &Path) -> Result<DocumentTable> {
    let content = std::fs::read(path).map_err(|source| IngestError::io(path, source))?;
    let first_line = content.split(|b| *b == b'\n').next().unwrap_or_default();
    let count = |needle: u8| first_line.iter().filter(|b| **b == needle).count();
    let delimiter = if count(b';') > count(b',') { b';' } else { b',' };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_slice());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }

    let Some(width) = rows.first().map(Vec::len) else {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    };
    for row in rows.iter_mut().skip(1) {
        while row.len() > width && row.last().is_some_and(String::is_empty) {
            row.pop();
        }
        if row.len() < width {
            row.resize(width, String::new());
        }
    }
    Ok(DocumentTable::new(rows))
}
