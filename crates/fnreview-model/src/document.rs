//! The two input shapes handed over by upstream document readers.

use serde::{Deserialize, Serialize};

/// A table as an ordered list of rows of plain-text cells.
///
/// The first row is treated as the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTable {
    pub rows: Vec<Vec<String>>,
}

impl DocumentTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header row.
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A fully materialized document: tables plus the plain-text body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tables: Vec<DocumentTable>,
    #[serde(default)]
    pub text: String,
}

impl Document {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            tables: Vec::new(),
            text: text.into(),
        }
    }

    pub fn from_tables(tables: Vec<DocumentTable>) -> Self {
        Self {
            tables,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Builds a table from string slices, handy for tests and fixtures.
pub fn table_from_rows<R, C>(rows: R) -> DocumentTable
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    DocumentTable {
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_body_split() {
        let table = table_from_rows([vec!["Function", "Available"], vec!["Login", "Yes"]]);
        assert_eq!(table.header().map(<[String]>::len), Some(2));
        assert_eq!(table.body().len(), 1);
        assert!(DocumentTable::default().body().is_empty());
    }
}
