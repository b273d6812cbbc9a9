//! Priority rules over per-function text blocks.

use std::collections::BTreeMap;

use fnreview_config::{ExtractionConfig, Rule, StrategyKind};
use fnreview_map::normalize_loose;
use fnreview_model::{
    CanonicalField, CellValue, Document, ExtractionFailure, FunctionRecord, RecordSet,
};
use tracing::{debug, trace};

use crate::phrase::GlobalPhrases;
use crate::segment::{Segment, Segmenter};
use crate::strategy::Strategy;

/// Block text with a lower-cased shadow copy of the same length.
///
/// Matching runs on the folded copy; removal applies to both, so what is left
/// of the original text keeps its case.
#[derive(Debug, Clone)]
struct FoldedText {
    original: Vec<char>,
    folded: Vec<char>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let original: Vec<char> = text.chars().collect();
        let folded = original.iter().map(|c| fold_char(*c)).collect();
        Self { original, folded }
    }

    /// Start of the first whole-word occurrence of `needle`.
    fn find(&self, needle: &[char]) -> Option<usize> {
        if needle.is_empty() || needle.len() > self.folded.len() {
            return None;
        }
        (0..=self.folded.len() - needle.len()).find(|&start| {
            let end = start + needle.len();
            self.folded[start..end] == *needle
                && !start
                    .checked_sub(1)
                    .is_some_and(|before| self.folded[before].is_alphanumeric())
                && !self.folded.get(end).is_some_and(|c| c.is_alphanumeric())
        })
    }

    fn remove(&mut self, start: usize, len: usize) {
        self.original.splice(start..start + len, [' ']);
        self.folded.splice(start..start + len, [' ']);
    }

    /// What is left once matched phrases are removed, or `None` if nothing
    /// but separators remains.
    ///
    /// Separators orphaned by a removal are dropped: a separator-only word is
    /// kept only when the word before it does not already end in one.
    fn remainder(&self) -> Option<String> {
        let text: String = self.original.iter().collect();
        let mut words: Vec<&str> = Vec::new();
        for word in text.split_whitespace() {
            if word.chars().all(is_separator)
                && words.last().is_none_or(|last| last.ends_with(is_separator))
            {
                continue;
            }
            words.push(word);
        }
        let text = words.join(" ");
        let text = text.trim_matches(|c: char| c.is_whitespace() || is_separator(c));
        text.chars()
            .any(char::is_alphanumeric)
            .then(|| text.to_string())
    }
}

fn is_separator(c: char) -> bool {
    ",;:-.".contains(c)
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold_phrase(phrase: &str) -> Vec<char> {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(fold_char)
        .collect()
}

#[derive(Debug, Clone)]
struct CompiledRule<'a> {
    rule: &'a Rule,
    phrase: Vec<char>,
}

/// The "exact" strategy.
///
/// Text is segmented into function blocks. Within a block rules run in
/// priority order; each match consumes its phrase and sets its field unless an
/// earlier rule already set it. Text left over after all matches becomes the
/// note of the highest-priority field that matched. Global phrases fill fields
/// no rule set. Sub-question blocks are only read while their parent function
/// is technically available.
pub struct RuleExtractor<'a> {
    segmenter: Segmenter,
    rules: Vec<CompiledRule<'a>>,
    phrases: GlobalPhrases,
}

impl<'a> RuleExtractor<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        let rules = config
            .rules()
            .iter()
            .map(|rule| CompiledRule {
                rule,
                phrase: fold_phrase(&rule.phrase),
            })
            .filter(|compiled| !compiled.phrase.is_empty())
            .collect();
        Self {
            segmenter: Segmenter::new(config),
            rules,
            phrases: GlobalPhrases::new(config),
        }
    }

    /// Field values found in one block.
    fn evaluate(&self, segment: &Segment) -> BTreeMap<CanonicalField, CellValue> {
        let mut fields = BTreeMap::new();
        let mut text = FoldedText::new(&segment.text);
        let mut primary: Option<CanonicalField> = None;

        for compiled in &self.rules {
            let rule = compiled.rule;
            if !rule.scope.applies_to(segment.is_subquestion()) {
                continue;
            }
            let Some(start) = text.find(&compiled.phrase) else {
                continue;
            };
            text.remove(start, compiled.phrase.len());
            if fields.contains_key(&rule.field) {
                trace!(rule = rule.label(), field = %rule.field, "field already set in block");
                continue;
            }
            trace!(rule = rule.label(), field = %rule.field, value = rule.value, "rule matched");
            fields.insert(rule.field, CellValue::answer(rule.value));
            primary.get_or_insert(rule.field);
        }

        if let Some(field) = primary
            && let Some(note) = text.remainder()
            && let Some(cell) = fields.get_mut(&field)
            && cell.note.is_none()
        {
            cell.note = Some(note);
        }

        for (field, value) in self.phrases.scan(&normalize_loose(&segment.text)) {
            fields.entry(field).or_insert_with(|| CellValue::answer(value));
        }
        fields
    }
}

impl Strategy for RuleExtractor<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Rule
    }

    fn extract(&self, document: &Document) -> Result<Vec<FunctionRecord>, ExtractionFailure> {
        if self.segmenter.is_empty() {
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
        for segment in self.segmenter.segment(&document.text) {
            let mut record = match &segment.subquestion {
                Some(text) => {
                    let parent_available = records
                        .get(&segment.function)
                        .and_then(|parent| parent.value(CanonicalField::TechnicalAvailability))
                        == Some(true);
                    if !parent_available {
                        debug!(
                            function = %segment.function,
                            "skipping sub-question block, parent is not technically available"
                        );
                        continue;
                    }
                    FunctionRecord::subquestion(&segment.function, text)
                }
                None => FunctionRecord::function(&segment.function),
            };
            record.fields = self.evaluate(&segment);
            records.merge(record);
        }
        Ok(records.into_records())
    }
}
