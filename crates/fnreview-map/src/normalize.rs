//! Text canonicalization shared by every extractor.
//!
//! Configured aliases and phrases go through the same functions as the
//! document text they are compared against; a match is only ever attempted
//! between two values normalized the same way.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing answer qualifier such as `(yes/no)` or `ja / nein`.
static TRAILING_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\(?\s*\b(?:yes\s*/\s*no|ja\s*/\s*nein)\s*\)?\s*$")
        .expect("Invalid trailing qualifier regex")
});

/// Escaped newline token left behind by some document exports.
const ESCAPED_NEWLINE: &str = "\\n";

/// Paragraph mark used by word processors.
const PARAGRAPH_MARK: char = '\u{b6}';

/// Canonical form for header and alias comparison.
///
/// Lower-cases, turns every line-break variant into a space, collapses
/// whitespace and strips a trailing yes/no qualifier as well as trailing
/// `:` and `?`.
pub fn normalize(text: &str) -> String {
    let mut value = collapse_whitespace(&break_lines(&text.to_lowercase()));
    loop {
        let before = value.len();
        value = value
            .trim_end_matches(|c: char| c == ':' || c == '?' || c.is_whitespace())
            .to_string();
        if let Some(found) = TRAILING_QUALIFIER.find(&value) {
            value.truncate(found.start());
        }
        if value.len() == before {
            break;
        }
    }
    value
}

/// Like [`normalize`], with punctuation replaced by spaces.
///
/// Used for line and phrase comparison where authors decorate names with
/// quotes, dashes or list markers.
pub fn normalize_loose(text: &str) -> String {
    let stripped: String = normalize(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&stripped)
}

/// Separator-insensitive key: whitespace, `-`, `_` and `/` removed, lower-cased.
pub fn segment_key(text: &str) -> String {
    break_lines(&text.to_lowercase())
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '/'))
        .collect()
}

/// Replaces line-break variants with plain spaces.
pub fn break_lines(text: &str) -> String {
    text.replace(ESCAPED_NEWLINE, " ")
        .replace(['\r', '\n', '\t', PARAGRAPH_MARK], " ")
}

/// Splits text into trimmed non-empty lines.
///
/// Paragraph marks, `\r` and the escaped newline token count as breaks.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace(ESCAPED_NEWLINE, "\n")
        .split(['\n', '\r', PARAGRAPH_MARK])
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Finds `needle` in `haystack` as a whole word sequence.
///
/// Both sides are expected to be normalized already. Returns the byte range
/// of the first occurrence whose neighbours are not alphanumeric.
pub fn find_phrase(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .match_indices(needle)
        .map(|(start, matched)| (start, start + matched.len()))
        .find(|&(start, end)| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
}

pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    find_phrase(haystack, needle).is_some()
}
