//! Splits free text into per-function blocks.
//!
//! A line whose label (the part before the first `:`) starts with a known
//! function or sub-question name opens a block; lines without a recognised
//! label continue the current block. Labels are compared with
//! [`segment_key`], so `Log-In`, `log in` and `LOGIN` are the same name.

use std::sync::LazyLock;

use fnreview_config::ExtractionConfig;
use fnreview_map::{segment_key, split_lines};
use fnreview_model::subquestion_name;
use regex::Regex;

static LIST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s*").expect("Invalid list number regex"));

/// Contiguous text attributed to one function or sub-question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub function: String,
    pub subquestion: Option<String>,
    pub text: String,
}

impl Segment {
    pub fn is_subquestion(&self) -> bool {
        self.subquestion.is_some()
    }

    /// Record name this block contributes to.
    pub fn record_name(&self) -> String {
        match &self.subquestion {
            Some(text) => subquestion_name(&self.function, text),
            None => self.function.clone(),
        }
    }

    fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }
}

#[derive(Debug, Clone)]
struct NameEntry {
    key: String,
    function: String,
    subquestion: Option<String>,
}

/// Name lookup compiled from the function catalog.
#[derive(Debug, Clone)]
pub struct Segmenter {
    /// Sub-question names of every function, longest key first.
    subquestions: Vec<NameEntry>,
    /// Function names, longest key first.
    functions: Vec<NameEntry>,
}

impl Segmenter {
    pub fn new(config: &ExtractionConfig) -> Self {
        let mut subquestions = Vec::new();
        let mut functions = Vec::new();
        for function in &config.functions {
            for name in function.names() {
                functions.push(NameEntry {
                    key: segment_key(name),
                    function: function.name.clone(),
                    subquestion: None,
                });
            }
            for subquestion in &function.subquestions {
                for name in subquestion.names() {
                    subquestions.push(NameEntry {
                        key: segment_key(name),
                        function: function.name.clone(),
                        subquestion: Some(subquestion.text.clone()),
                    });
                }
            }
        }
        for entries in [&mut subquestions, &mut functions] {
            entries.retain(|entry| !entry.key.is_empty());
            entries.sort_by_key(|entry| std::cmp::Reverse(entry.key.chars().count()));
        }
        Self {
            subquestions,
            functions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn lookup(&self, label: &str) -> Option<&NameEntry> {
        let key = segment_key(label);
        self.subquestions
            .iter()
            .chain(&self.functions)
            .find(|entry| key.starts_with(&entry.key))
    }

    /// Splits `text` into blocks. Text before the first recognised name is dropped.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for raw in split_lines(text) {
            let line = LIST_NUMBER.replace(&raw, "");
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let label = line.split_once(':').map_or(line, |(label, _)| label);
            match self.lookup(label) {
                Some(entry) => {
                    let body = match line.split_once(':') {
                        Some((_, rest)) => rest.trim(),
                        None => strip_key_prefix(line, &entry.key),
                    };
                    let continues_last = segments.last().is_some_and(|last| {
                        last.function == entry.function && last.subquestion == entry.subquestion
                    });
                    if continues_last {
                        if let Some(last) = segments.last_mut() {
                            last.append(body);
                        }
                    } else {
                        segments.push(Segment {
                            function: entry.function.clone(),
                            subquestion: entry.subquestion.clone(),
                            text: body.to_string(),
                        });
                    }
                }
                None => {
                    if let Some(last) = segments.last_mut() {
                        last.append(line);
                    }
                }
            }
        }
        segments
    }
}

/// Removes a leading name from `line`, ignoring case and separators.
///
/// Returns `line` unchanged when it does not start with `key`.
fn strip_key_prefix<'l>(line: &'l str, key: &str) -> &'l str {
    let mut expected = key.chars().peekable();
    let mut end = 0;
    for (idx, c) in line.char_indices() {
        if expected.peek().is_none() {
            break;
        }
        if c.is_whitespace() || matches!(c, '-' | '_' | '/') {
            continue;
        }
        for lower in c.to_lowercase() {
            if expected.next() != Some(lower) {
                return line;
            }
        }
        end = idx + c.len_utf8();
    }
    if expected.peek().is_some() {
        return line;
    }
    line[end..].trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | ':'))
}
