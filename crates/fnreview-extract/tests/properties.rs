//! Property tests for cell parsing and extractor determinism.

use fnreview_config::{ExtractionConfig, FunctionSpec, StrategyKind, SubQuestionSpec};
use fnreview_extract::{build_strategy, leading_answer, parse_cell};
use fnreview_model::{Document, DocumentTable};
use proptest::prelude::*;

fn config() -> ExtractionConfig {
    ExtractionConfig::default()
        .with_function(
            FunctionSpec::new("Login").with_subquestion(SubQuestionSpec::new("Audit trail")),
        )
        .with_function(FunctionSpec::new("Reporting").with_alias("Reports"))
}

fn line_strategy() -> impl Strategy<Value = String> {
    let labels = prop::sample::select(vec![
        "Login: ",
        "Reporting: ",
        "Reports - ",
        "Audit trail: ",
        "1. Login: ",
        "",
    ]);
    let bodies = prop::sample::select(vec![
        "technically available",
        "not technically available",
        "in use: yes",
        "in use: no",
        "not in use",
        "uses AI",
        "no AI",
        "used for monitoring",
        "internal only",
        "Ja/Nein",
    ]);
    (labels, prop::collection::vec(bodies, 1..3))
        .prop_map(|(label, bodies)| format!("{label}{}", bodies.join(", ")))
}

fn cell_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Yes", "No", "Ja", "Nein", "Yes (internal only)", "No, later", "(No)", "", "n/a",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn note_never_repeats_the_answer(text in "[A-Za-z ,;:()/-]{0,30}") {
        let cell = parse_cell(&text);
        if cell.value.is_some()
            && let Some(note) = &cell.note
        {
            prop_assert!(!note.trim().is_empty());
            let bare = leading_answer(note)
                .is_some_and(|(_, rest)| !rest.chars().any(char::is_alphanumeric));
            prop_assert!(!bare, "note {:?} from {:?}", note, text);
        }
    }

    #[test]
    fn leading_answer_keeps_note_text(
        token in prop::sample::select(vec![("Yes", true), ("no", false), ("JA", true), ("Nein", false)]),
        separator in prop::sample::select(vec![" ", ", ", ": ", " - ", "; "]),
        note in "[a-z]{3,8}( [a-z]{2,8}){0,2}",
    ) {
        prop_assume!(leading_answer(&note).is_none());
        let cell = parse_cell(&format!("{}{}{}", token.0, separator, note));
        prop_assert_eq!(cell.value, Some(token.1));
        prop_assert_eq!(cell.note, Some(note));
    }

    #[test]
    fn text_strategies_are_deterministic(lines in prop::collection::vec(line_strategy(), 0..8)) {
        let config = config();
        let document = Document::from_text(lines.join("\n"));
        for kind in [StrategyKind::Rule, StrategyKind::Phrase] {
            let strategy = build_strategy(kind, &config);
            let first = strategy.extract(&document);
            let second = strategy.extract(&document);
            prop_assert_eq!(&first, &second);
            let rebuilt = build_strategy(kind, &config).extract(&document);
            prop_assert_eq!(first, rebuilt);
        }
    }

    #[test]
    fn table_strategy_is_deterministic(
        rows in prop::collection::vec(
            (prop::sample::select(vec!["Login", "Reporting", "", "If the function is technically available"]),
             prop::sample::select(vec!["", "Audit trail", "Export"]),
             cell_strategy(),
             cell_strategy()),
            0..8,
        ),
    ) {
        let config = config();
        let mut table = vec![vec![
            "Function".to_string(),
            String::new(),
            "Technical availability".to_string(),
            "AI involvement".to_string(),
        ]];
        table.extend(rows.into_iter().map(|(name, sub, ta, ai)| {
            vec![name.to_string(), sub.to_string(), ta, ai]
        }));
        let document = Document::from_tables(vec![DocumentTable::new(table)]);
        let strategy = build_strategy(StrategyKind::Table, &config);
        prop_assert_eq!(strategy.extract(&document), strategy.extract(&document));
    }
}
