use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fnreview_extract::ExtractionOutcome;
use fnreview_model::{CanonicalField, CellValue, ReconciledField, SourceKind};
use fnreview_reconcile::ReconciliationReport;

pub fn print_extraction(outcome: &ExtractionOutcome) {
    match outcome.strategy {
        Some(strategy) => println!("Strategy: {strategy}"),
        None => println!("Strategy: none produced records"),
    }
    for (strategy, failure) in &outcome.failures {
        println!("  {strategy}: {failure}");
    }
    if outcome.is_empty() {
        return;
    }

    let mut table = Table::new();
    let mut header = vec![header_cell("Function")];
    header.extend(
        CanonicalField::ALL
            .iter()
            .map(|field| header_cell(field.default_label())),
    );
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=CanonicalField::ALL.len() {
        align_column(&mut table, index, CellAlignment::Center);
    }

    for record in &outcome.records {
        let mut row = vec![function_cell(&record.name, record.is_subquestion())];
        row.extend(
            CanonicalField::ALL
                .iter()
                .map(|field| extracted_cell(record.get(*field))),
        );
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_report(report: &ReconciliationReport) {
    let mut table = Table::new();
    let mut header = vec![header_cell("Function")];
    header.extend(
        CanonicalField::ALL
            .iter()
            .map(|field| header_cell(field.default_label())),
    );
    header.push(header_cell("Negotiable"));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=CanonicalField::ALL.len() + 1 {
        align_column(&mut table, index, CellAlignment::Center);
    }

    for decision in &report.functions {
        let mut row = vec![function_cell(&decision.name, decision.parent.is_some())];
        row.extend(
            CanonicalField::ALL
                .iter()
                .map(|field| reconciled_cell(decision.get(*field))),
        );
        row.push(flag_cell(decision.negotiable));
        table.add_row(row);
    }
    println!("{table}");

    let sources = report.source_counts();
    let source_count = |kind: SourceKind| sources.get(&kind).copied().unwrap_or(0);
    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("Review"),
        header_cell("Agree"),
        header_cell("Undecided"),
        header_cell("Manual"),
        header_cell("AI"),
        header_cell("Document"),
    ]);
    apply_table_style(&mut totals);
    totals.add_row(vec![
        count_cell(Some(report.review_count()), Color::Red),
        count_cell(Some(report.agreement_count()), Color::Green),
        count_cell(Some(report.undecided_count()), Color::Yellow),
        Cell::new(source_count(SourceKind::Manual)),
        Cell::new(source_count(SourceKind::Ai)),
        Cell::new(source_count(SourceKind::Document)),
    ]);
    println!("{totals}");

    if !report.conflicts.is_empty() {
        print_conflicts(report);
    }
}

fn print_conflicts(report: &ReconciliationReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Function"),
        header_cell("Field"),
        header_cell("Document"),
        header_cell("AI"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for conflict in &report.conflicts {
        table.add_row(vec![
            Cell::new(&conflict.function),
            Cell::new(conflict.field.default_label()),
            answer_cell(Some(conflict.document)),
            answer_cell(Some(conflict.ai)),
        ]);
    }
    println!("Needs review:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn function_cell(name: &str, is_subquestion: bool) -> Cell {
    if is_subquestion {
        Cell::new(format!("  {name}")).fg(Color::DarkGrey)
    } else {
        Cell::new(name).add_attribute(Attribute::Bold)
    }
}

fn answer_cell(value: Option<bool>) -> Cell {
    match value {
        Some(true) => Cell::new("yes").fg(Color::Green),
        Some(false) => Cell::new("no").fg(Color::Red),
        None => dim_cell("?"),
    }
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Yellow)
    }
}

fn extracted_cell(cell: Option<&CellValue>) -> Cell {
    match cell {
        None => dim_cell("-"),
        Some(CellValue { value, note: None }) => answer_cell(*value),
        Some(CellValue {
            value,
            note: Some(note),
        }) => {
            let label = match value {
                Some(true) => "yes",
                Some(false) => "no",
                None => "?",
            };
            Cell::new(format!("{label} ({note})"))
        }
    }
}

fn reconciled_cell(field: Option<&ReconciledField>) -> Cell {
    let Some(field) = field else {
        return dim_cell("-");
    };
    if field.requires_manual_review {
        let label = match field.canonical_value {
            Some(true) => "yes!",
            Some(false) => "no!",
            None => "?!",
        };
        return Cell::new(label).fg(Color::Red).add_attribute(Attribute::Bold);
    }
    let mut cell = answer_cell(field.canonical_value);
    if field.subquestion_available {
        cell = cell.add_attribute(Attribute::Italic);
    }
    cell
}
