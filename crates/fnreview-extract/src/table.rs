//! Column-based extraction from document tables.

use fnreview_config::{ExtractionConfig, StrategyKind};
use fnreview_map::HeaderTarget;
use fnreview_model::{
    CanonicalField, Document, DocumentTable, ExtractionFailure, FunctionRecord, RecordSet,
};
use tracing::{debug, trace};

use crate::cell::parse_cell;
use crate::strategy::Strategy;

/// Resolved header layout of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnLayout {
    function: usize,
    fields: Vec<(usize, CanonicalField)>,
}

impl ColumnLayout {
    /// Column holding sub-question text on sub-question rows.
    fn subquestion_column(&self) -> usize {
        self.function + 1
    }
}

/// Reads the first table whose header names a function column.
///
/// A row with text in the function column starts a new function; a row with
/// an empty function column but text in the column right after it is a
/// sub-question of the current function. Tables are never merged: the first
/// table that yields records wins.
pub struct TableExtractor<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> TableExtractor<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self { config }
    }

    fn layout(
        &self,
        table_index: usize,
        header: &[String],
    ) -> Result<Option<ColumnLayout>, ExtractionFailure> {
        let mut function: Option<usize> = None;
        let mut fields: Vec<(usize, CanonicalField)> = Vec::new();

        for (column, cell) in header.iter().enumerate() {
            let Some(target) = self.config.alias_map().resolve(cell) else {
                continue;
            };
            let previous = match target {
                HeaderTarget::Function => function.replace(column),
                HeaderTarget::Field(field) => {
                    let previous = fields.iter().find(|(_, f)| *f == field).map(|(c, _)| *c);
                    if previous.is_none() {
                        fields.push((column, field));
                    }
                    previous
                }
            };
            if let Some(first) = previous {
                return Err(ExtractionFailure::DuplicateColumn {
                    table: table_index,
                    target: target.to_string(),
                    first,
                    second: column,
                });
            }
        }

        Ok(match function {
            Some(function) if !fields.is_empty() => Some(ColumnLayout { function, fields }),
            _ => None,
        })
    }

    fn read_table(
        &self,
        table_index: usize,
        table: &DocumentTable,
        layout: &ColumnLayout,
    ) -> RecordSet {
        let width = table.header().map_or(0, <[String]>::len);
        let mut records = RecordSet::new();
        let mut current: Option<String> = None;

        for (row_index, row) in table.body().iter().enumerate() {
            if row.len() > width {
                trace!(
                    table_index,
                    row_index,
                    cells = row.len(),
                    width,
                    "ignoring cells beyond the header"
                );
            }
            let cell = |column: usize| {
                row.get(column)
                    .filter(|_| column < width)
                    .map_or("", |text| text.trim())
            };

            let name = cell(layout.function);
            let mut record = if !name.is_empty() && !self.config.is_boilerplate(name) {
                current = Some(name.to_string());
                FunctionRecord::function(name)
            } else {
                let text = cell(layout.subquestion_column());
                match &current {
                    Some(parent) if !text.is_empty() => FunctionRecord::subquestion(parent, text),
                    _ => {
                        trace!(table_index, row_index, "row names no function");
                        continue;
                    }
                }
            };

            for &(column, field) in &layout.fields {
                if record.is_subquestion() && column == layout.subquestion_column() {
                    continue;
                }
                let raw = cell(column);
                if raw.is_empty() {
                    continue;
                }
                record.set(field, parse_cell(raw));
            }
            trace!(
                table_index,
                row_index,
                subquestion = record.is_subquestion(),
                fields = record.fields.len(),
                "read table row"
            );
            records.merge(record);
        }
        records
    }
}

impl Strategy for TableExtractor<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Table
    }

    fn extract(&self, document: &Document) -> Result<Vec<FunctionRecord>, ExtractionFailure> {
        if document.tables.is_empty() {
            return Err(ExtractionFailure::MissingInput {
                strategy: self.kind().to_string(),
                what: "document has no tables".to_string(),
            });
        }

        let mut skipped: Option<ExtractionFailure> = None;
        for (table_index, table) in document.tables.iter().enumerate() {
            let Some(header) = table.header() else {
                continue;
            };
            let layout = match self.layout(table_index, header) {
                Ok(Some(layout)) => layout,
                Ok(None) => {
                    debug!(table_index, "no function column in header, skipping table");
                    continue;
                }
                Err(failure) => {
                    debug!(table_index, reason = %failure, "ambiguous header, skipping table");
                    skipped.get_or_insert(failure);
                    continue;
                }
            };
            debug!(
                table_index,
                function_column = layout.function,
                field_columns = layout.fields.len(),
                "resolved table header"
            );

            let records = self.read_table(table_index, table, &layout);
            if !records.is_empty() {
                debug!(table_index, records = records.len(), "table yielded records");
                return Ok(records.into_records());
            }
        }
        // An ambiguous table only counts as a failure when no other table matched.
        match skipped {
            Some(failure) => Err(failure),
            None => Ok(Vec::new()),
        }
    }
}
