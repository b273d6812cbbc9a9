use std::path::Path;

use fnreview_model::Document;
use tracing::{debug, info};

use crate::csv_table::read_csv_table;
use crate::error::{IngestError, Result};

/// Loads a document by file extension.
///
/// - `.json`: a serialized document with `tables` and/or `text`
/// - `.txt`, `.md`: the whole file as text body
/// - `.csv`: a single table
pub fn load_document(path: &Path) -> Result<Document> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let document = match extension.as_str() {
        "json" => {
            let content =
                std::fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
            serde_json::from_str::<Document>(&content).map_err(|source| IngestError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        "txt" | "md" | "text" => {
            let content =
                std::fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
            Document::from_text(content.trim_start_matches('\u{feff}'))
        }
        "csv" => Document::from_tables(vec![read_csv_table(path)?]),
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            });
        }
    };

    debug!(
        path = %path.display(),
        tables = document.tables.len(),
        text_len = document.text.len(),
        "parsed document"
    );
    info!(path = %path.display(), "loaded document");
    Ok(document)
}

/// Loads a CSV table and attaches the text of a second file as body.
pub fn load_table_with_text(table: &Path, text: &Path) -> Result<Document> {
    let body = std::fs::read_to_string(text).map_err(|source| IngestError::io(text, source))?;
    Ok(Document::from_tables(vec![read_csv_table(table)?]).with_text(body))
}
