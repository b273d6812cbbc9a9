//! Yes/no answers with an optional annotation.
//!
//! Two layouts occur in practice: the answer first (`Yes (internal only)`,
//! `No, later`) and the answer last inside parentheses (`Later (No)`).

use fnreview_model::CellValue;

const ANSWER_TOKENS: &[(&str, bool)] = &[("yes", true), ("ja", true), ("no", false), ("nein", false)];

const SEPARATORS: [char; 4] = [',', ':', ';', '-'];

/// Splits a leading yes/no token off `text`.
///
/// The token must be followed by a non-alphanumeric character or the end of
/// the text, so `Nothing` is not read as `No`.
pub fn leading_answer(text: &str) -> Option<(bool, &str)> {
    let text = text.trim_start();
    ANSWER_TOKENS.iter().find_map(|&(token, value)| {
        let head = text.get(..token.len())?;
        if !head.eq_ignore_ascii_case(token) {
            return None;
        }
        let rest = &text[token.len()..];
        match rest.chars().next() {
            Some(c) if c.is_alphanumeric() => None,
            _ => Some((value, rest)),
        }
    })
}

/// Parses one cell into a value and note.
pub fn parse_cell(raw: &str) -> CellValue {
    let text = raw.trim();
    if is_unanswered_template(text) {
        return CellValue::indeterminate();
    }

    if let Some((value, rest)) = leading_answer(text) {
        return CellValue::new(Some(value), answer_note(strip_separator(rest)));
    }

    match first_parenthetical(text) {
        Some((inner, outside)) => {
            if let Some((value, rest)) = leading_answer(&outside) {
                let note = answer_note(inner).or_else(|| answer_note(strip_separator(rest)));
                CellValue::new(Some(value), note)
            } else if let Some(value) = bare_answer(inner) {
                CellValue::new(Some(value), answer_note(&outside))
            } else {
                CellValue::new(None, clean_note(inner))
            }
        }
        None => CellValue::new(None, clean_note(text)),
    }
}

/// `Yes/No` or `Ja / Nein` left as written in the form template.
fn is_unanswered_template(text: &str) -> bool {
    let Some((first, rest)) = leading_answer(text) else {
        return false;
    };
    let Some(rest) = rest.trim_start().strip_prefix('/') else {
        return false;
    };
    matches!(
        leading_answer(rest),
        Some((second, tail)) if second != first && !tail.chars().any(char::is_alphanumeric)
    )
}

/// The answer when `text` holds nothing but a token.
fn bare_answer(text: &str) -> Option<bool> {
    let (value, rest) = leading_answer(text)?;
    (!rest.chars().any(char::is_alphanumeric)).then_some(value)
}

fn strip_separator(rest: &str) -> &str {
    let trimmed = rest.trim_start();
    trimmed.strip_prefix(SEPARATORS).unwrap_or(trimmed)
}

/// Note next to an answer. A second bare token is not a note.
fn answer_note(text: &str) -> Option<String> {
    clean_note(text).filter(|note| bare_answer(note).is_none())
}

fn clean_note(text: &str) -> Option<String> {
    let note = unwrap_parenthetical(text.trim()).trim();
    note.chars()
        .any(char::is_alphanumeric)
        .then(|| note.to_string())
}

/// Removes one pair of parentheses enclosing the whole text.
fn unwrap_parenthetical(text: &str) -> &str {
    if text.starts_with('(') && matching_close(text, 0) == Some(text.len() - 1) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// First balanced parenthetical: its trimmed content and the text around it.
fn first_parenthetical(text: &str) -> Option<(&str, String)> {
    let open = text.find('(')?;
    let close = matching_close(text, open)?;
    let inner = text[open + 1..close].trim();
    let outside = format!("{} {}", &text[..open], &text[close + 1..]);
    Some((inner, outside.split_whitespace().collect::<Vec<_>>().join(" ")))
}

fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}
