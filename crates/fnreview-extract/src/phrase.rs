//! Line-wise extraction by name aliases and global phrases.

use fnreview_config::{ExtractionConfig, StrategyKind};
use fnreview_map::{contains_phrase, normalize_loose, split_lines};
use fnreview_model::{CanonicalField, CellValue, Document, ExtractionFailure, FunctionRecord, RecordSet};
use tracing::trace;

use crate::strategy::Strategy;

/// Global true/false phrases, normalized once.
#[derive(Debug, Clone, Default)]
pub(crate) struct GlobalPhrases {
    entries: Vec<(CanonicalField, Vec<String>, Vec<String>)>,
}

impl GlobalPhrases {
    pub(crate) fn new(config: &ExtractionConfig) -> Self {
        let normalized = |phrases: &[String]| -> Vec<String> {
            phrases
                .iter()
                .map(|phrase| normalize_loose(phrase))
                .filter(|phrase| !phrase.is_empty())
                .collect()
        };
        let entries = config
            .phrases
            .iter()
            .map(|(field, phrases)| {
                (
                    *field,
                    normalized(&phrases.true_phrases),
                    normalized(&phrases.false_phrases),
                )
            })
            .filter(|(_, true_phrases, false_phrases)| {
                !true_phrases.is_empty() || !false_phrases.is_empty()
            })
            .collect();
        Self { entries }
    }

    /// Field answers found in a loosely normalized line. True phrases are
    /// tested before false phrases.
    pub(crate) fn scan(&self, line: &str) -> Vec<(CanonicalField, bool)> {
        self.entries
            .iter()
            .filter_map(|(field, true_phrases, false_phrases)| {
                if true_phrases.iter().any(|phrase| contains_phrase(line, phrase)) {
                    Some((*field, true))
                } else if false_phrases.iter().any(|phrase| contains_phrase(line, phrase)) {
                    Some((*field, false))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Alias list sorted longest first.
type AliasList = Vec<(String, usize)>;

fn sorted_aliases<'n>(names: impl Iterator<Item = (&'n str, usize)>) -> AliasList {
    let mut aliases: AliasList = names
        .map(|(name, index)| (normalize_loose(name), index))
        .filter(|(alias, _)| !alias.is_empty())
        .collect();
    aliases.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.len()));
    aliases
}

/// Scans text line by line for configured names.
///
/// A sub-question is only recognised right after a line naming its parent
/// function (or another of that parent's sub-questions); a sub-question
/// without such a line produces no record.
pub struct PhraseExtractor<'a> {
    config: &'a ExtractionConfig,
    functions: AliasList,
    subquestions: Vec<AliasList>,
    phrases: GlobalPhrases,
}

impl<'a> PhraseExtractor<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        let functions = sorted_aliases(
            config
                .functions
                .iter()
                .enumerate()
                .flat_map(|(index, function)| function.names().map(move |name| (name, index))),
        );
        let subquestions = config
            .functions
            .iter()
            .map(|function| {
                sorted_aliases(
                    function
                        .subquestions
                        .iter()
                        .enumerate()
                        .flat_map(|(index, sub)| sub.names().map(move |name| (name, index))),
                )
            })
            .collect();
        Self {
            config,
            functions,
            subquestions,
            phrases: GlobalPhrases::new(config),
        }
    }

    fn match_function(&self, line: &str) -> Option<usize> {
        self.functions
            .iter()
            .find(|(alias, _)| contains_phrase(line, alias))
            .map(|(_, index)| *index)
    }

    fn match_subquestion(&self, function: usize, line: &str) -> Option<usize> {
        self.subquestions
            .get(function)?
            .iter()
            .find(|(alias, _)| contains_phrase(line, alias))
            .map(|(_, index)| *index)
    }
}

impl Strategy for PhraseExtractor<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Phrase
    }

    fn extract(&self, document: &Document) -> Result<Vec<FunctionRecord>, ExtractionFailure> {
        if self.functions.is_empty() {
            return Err(ExtractionFailure::MissingInput {
                strategy: self.kind().to_string(),
                what: "no functions configured".to_string(),
            });
        }
        if !document.has_text() {
            return Err(ExtractionFailure::MissingInput {
                strategy: self.kind().to_string(),
                what: "document has no text".to_string(),
            });
        }

        let mut records = RecordSet::new();
        let mut last_main: Option<usize> = None;

        for (line_index, raw) in split_lines(&document.text).iter().enumerate() {
            let line = normalize_loose(raw);
            if line.is_empty() {
                continue;
            }

            let mut record = if let Some(function) = last_main
                && let Some(sub) = self.match_subquestion(function, &line)
            {
                let spec = &self.config.functions[function];
                FunctionRecord::subquestion(&spec.name, &spec.subquestions[sub].text)
            } else if let Some(function) = self.match_function(&line) {
                last_main = Some(function);
                FunctionRecord::function(&self.config.functions[function].name)
            } else {
                continue;
            };

            for (field, value) in self.phrases.scan(&line) {
                record.set(field, CellValue::answer(value));
            }
            trace!(
                line_index,
                subquestion = record.is_subquestion(),
                fields = record.fields.len(),
                "matched line"
            );
            records.merge(record);
        }
        Ok(records.into_records())
    }
}
