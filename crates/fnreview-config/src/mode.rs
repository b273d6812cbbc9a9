//! Strategy selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three extraction algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Column-based reading of document tables.
    #[serde(rename = "table")]
    Table,
    /// Priority rules over per-function text blocks ("exact").
    #[serde(rename = "exact")]
    Rule,
    /// Line-wise alias and global phrase matching ("text").
    #[serde(rename = "text")]
    Phrase,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::Table, StrategyKind::Rule, StrategyKind::Phrase];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Table => "table",
            StrategyKind::Rule => "exact",
            StrategyKind::Phrase => "text",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(StrategyKind::Table),
            "exact" | "rule" | "rules" => Ok(StrategyKind::Rule),
            "text" | "phrase" | "phrases" => Ok(StrategyKind::Phrase),
            _ => Err(format!("Unknown extraction strategy: {}", s)),
        }
    }
}

/// How the orchestrator picks strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionMode {
    TableOnly,
    RuleOnly,
    PhraseOnly,
    /// Try each strategy in order; the first non-empty result wins.
    Auto(Vec<StrategyKind>),
}

impl ExtractionMode {
    /// Strategies to run, in order.
    pub fn strategies(&self) -> Vec<StrategyKind> {
        match self {
            ExtractionMode::TableOnly => vec![StrategyKind::Table],
            ExtractionMode::RuleOnly => vec![StrategyKind::Rule],
            ExtractionMode::PhraseOnly => vec![StrategyKind::Phrase],
            ExtractionMode::Auto(order) => order.clone(),
        }
    }

    pub fn falls_back(&self) -> bool {
        matches!(self, ExtractionMode::Auto(_))
    }

    /// Configuration name of the mode without its order.
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionMode::TableOnly => "table_only",
            ExtractionMode::RuleOnly => "rule_only",
            ExtractionMode::PhraseOnly => "phrase_only",
            ExtractionMode::Auto(_) => "auto",
        }
    }

    /// Builds a mode from its configuration name and an optional order.
    ///
    /// Duplicate entries in `order` are dropped, keeping the first position.
    pub fn from_parts(name: &str, order: Option<&[StrategyKind]>) -> Result<Self, String> {
        match name.trim().to_lowercase().as_str() {
            "auto" => {
                let order = match order {
                    Some(order) => {
                        let mut unique = Vec::with_capacity(order.len());
                        for kind in order {
                            if !unique.contains(kind) {
                                unique.push(*kind);
                            }
                        }
                        unique
                    }
                    None => StrategyKind::ALL.to_vec(),
                };
                Ok(ExtractionMode::Auto(order))
            }
            "table_only" | "table" => Ok(ExtractionMode::TableOnly),
            "rule_only" | "exact_only" | "exact" => Ok(ExtractionMode::RuleOnly),
            "phrase_only" | "text_only" | "text" => Ok(ExtractionMode::PhraseOnly),
            _ => Err(format!("Unknown extraction mode: {}", name)),
        }
    }
}

impl Default for ExtractionMode {
    fn default() -> Self {
        ExtractionMode::Auto(StrategyKind::ALL.to_vec())
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Auto(order) => {
                let names: Vec<_> = order.iter().map(StrategyKind::as_str).collect();
                write!(f, "auto({})", names.join(", "))
            }
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_accepts_both_spellings() {
        assert_eq!("exact".parse::<StrategyKind>(), Ok(StrategyKind::Rule));
        assert_eq!("Rule".parse::<StrategyKind>(), Ok(StrategyKind::Rule));
        assert_eq!("phrase".parse::<StrategyKind>(), Ok(StrategyKind::Phrase));
        assert!("ocr".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn auto_order_is_deduplicated() {
        let mode = ExtractionMode::from_parts(
            "auto",
            Some(&[StrategyKind::Rule, StrategyKind::Table, StrategyKind::Rule]),
        )
        .expect("valid mode");
        assert_eq!(mode, ExtractionMode::Auto(vec![StrategyKind::Rule, StrategyKind::Table]));
        assert_eq!(mode.to_string(), "auto(exact, table)");
    }

    #[test]
    fn single_modes_do_not_fall_back() {
        let mode = ExtractionMode::from_parts("text_only", None).expect("valid mode");
        assert_eq!(mode, ExtractionMode::PhraseOnly);
        assert!(!mode.falls_back());
        assert_eq!(mode.strategies(), vec![StrategyKind::Phrase]);
    }
}
