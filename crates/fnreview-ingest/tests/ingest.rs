//! Tests for loading documents from disk.

use std::fs;

use fnreview_ingest::{IngestError, load_document, load_table_with_text, read_csv_table};
use fnreview_model::table_from_rows;
use tempfile::TempDir;

#[test]
fn test_load_csv_table() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("functions.csv");
    fs::write(
        &path,
        "\u{feff}Function;Technical availability;Employer deployment\n\
         ;;\n\
         Login;Yes (internal only);\"No; later\"\n\
         ;Is it logged?\n",
    )
    .expect("write csv");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(
        table,
        table_from_rows([
            vec!["Function", "Technical availability", "Employer deployment"],
            vec!["Login", "Yes (internal only)", "No; later"],
            vec!["", "Is it logged?", ""],
        ])
    );

    let document = load_document(&path).expect("load csv document");
    assert_eq!(document.tables.len(), 1);
    assert!(!document.has_text());
}

#[test]
fn test_load_json_and_text() {
    let dir = TempDir::new().expect("temp dir");
    let json = dir.path().join("doc.json");
    fs::write(
        &json,
        r#"{"tables": [{"rows": [["Function", "AI involvement"], ["Chat", "Yes"]]}], "text": "Chat: uses AI"}"#,
    )
    .expect("write json");
    let document = load_document(&json).expect("load json");
    assert_eq!(document.tables.len(), 1);
    assert_eq!(document.text, "Chat: uses AI");

    let text = dir.path().join("notes.TXT");
    fs::write(&text, "Login: technically available\n").expect("write text");
    let document = load_document(&text).expect("load text");
    assert!(document.tables.is_empty());
    assert!(document.text.starts_with("Login"));

    let csv = dir.path().join("table.csv");
    fs::write(&csv, "Function,AI involvement\nChat,No\n").expect("write csv");
    let document = load_table_with_text(&csv, &text).expect("load combined");
    assert_eq!(document.tables.len(), 1);
    assert!(document.has_text());
}

#[test]
fn test_load_errors() {
    let dir = TempDir::new().expect("temp dir");

    let docx = dir.path().join("review.docx");
    fs::write(&docx, b"PK").expect("write docx");
    assert!(matches!(
        load_document(&docx),
        Err(IngestError::UnsupportedFormat { extension, .. }) if extension == "docx"
    ));

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, ",,\n\n").expect("write empty csv");
    assert!(matches!(
        load_document(&empty),
        Err(IngestError::EmptyTable { .. })
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"tables\": 3}").expect("write json");
    assert!(matches!(load_document(&broken), Err(IngestError::Json { .. })));

    let missing = dir.path().join("missing.txt");
    assert!(matches!(load_document(&missing), Err(IngestError::Io { .. })));
}
