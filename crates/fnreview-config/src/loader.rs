//! TOML configuration files.
//!
//! Every top-level section is optional. A missing section keeps the built-in
//! default for that section; a present section replaces it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use fnreview_map::{HeaderTarget, normalize};
use fnreview_model::CanonicalField;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::FunctionSpec;
use crate::config::{ExtractionConfig, FieldPhrases, ReviewOptions};
use crate::error::{ConfigLoadError, Result};
use crate::mode::{ExtractionMode, StrategyKind};
use crate::rule::Rule;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extraction: Option<RawExtraction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phrases: Option<BTreeMap<String, RawPhrases>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table: Option<RawTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review: Option<RawReview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    functions: Option<Vec<FunctionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rules: Option<Vec<Rule>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExtraction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<Vec<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPhrases {
    #[serde(rename = "true", default)]
    true_phrases: Vec<String>,
    #[serde(rename = "false", default)]
    false_phrases: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTable {
    #[serde(default)]
    boilerplate: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flag_subquestion_availability: Option<bool>,
}

/// Reads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::io(path, e))?;
    let config = parse(&contents, &path.display().to_string())?;
    info!(
        path = %path.display(),
        mode = %config.mode,
        functions = config.functions.len(),
        rules = config.rules().len(),
        "loaded extraction configuration"
    );
    Ok(config)
}

impl ExtractionConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        parse(text, "<string>")
    }

    /// Serializes the configuration in the file format read by [`load_config`].
    pub fn to_toml_string(&self) -> Result<String> {
        let order = match &self.mode {
            ExtractionMode::Auto(order) => Some(order.iter().map(ToString::to_string).collect()),
            _ => None,
        };
        let raw = RawConfig {
            extraction: Some(RawExtraction {
                mode: Some(self.mode.name().to_string()),
                order,
            }),
            headers: Some(
                self.header_aliases()
                    .iter()
                    .map(|(target, aliases)| (target.as_str().to_string(), aliases.clone()))
                    .collect(),
            ),
            phrases: Some(
                self.phrases
                    .iter()
                    .map(|(field, phrases)| {
                        (
                            field.as_str().to_string(),
                            RawPhrases {
                                true_phrases: phrases.true_phrases.clone(),
                                false_phrases: phrases.false_phrases.clone(),
                            },
                        )
                    })
                    .collect(),
            ),
            table: Some(RawTable {
                boilerplate: self.boilerplate.clone(),
            }),
            review: Some(RawReview {
                flag_subquestion_availability: Some(
                    self.review.flag_subquestion_availability,
                ),
            }),
            functions: Some(self.functions.clone()),
            rules: Some(self.rules().to_vec()),
        };
        toml::to_string_pretty(&raw).map_err(|source| ConfigLoadError::Serialize { source })
    }
}

fn parse(text: &str, origin: &str) -> Result<ExtractionConfig> {
    let raw: RawConfig = toml::from_str(text).map_err(|source| ConfigLoadError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    build(raw)
}

fn build(raw: RawConfig) -> Result<ExtractionConfig> {
    let defaults = ExtractionConfig::default();
    let mut config = ExtractionConfig::empty();

    config.mode = match raw.extraction {
        Some(extraction) => parse_mode(extraction)?,
        None => defaults.mode.clone(),
    };

    let header_aliases = match raw.headers {
        Some(headers) => parse_headers(headers)?,
        None => defaults.header_aliases().clone(),
    };
    config.set_header_aliases(header_aliases)?;

    config.phrases = match raw.phrases {
        Some(phrases) => parse_phrases(phrases)?,
        None => defaults.phrases.clone(),
    };

    config.functions = validate_functions(raw.functions.unwrap_or_default())?;

    let rules = match raw.rules {
        Some(rules) => validate_rules(rules)?,
        None => defaults.rules().to_vec(),
    };
    config = config.with_rules(rules);

    config.boilerplate = match raw.table {
        Some(table) => table.boilerplate,
        None => defaults.boilerplate.clone(),
    };

    let mut review = ReviewOptions::default();
    if let Some(flag) = raw
        .review
        .and_then(|review| review.flag_subquestion_availability)
    {
        review.flag_subquestion_availability = flag;
    }
    config.review = review;

    Ok(config)
}

fn parse_mode(raw: RawExtraction) -> Result<ExtractionMode> {
    let name = raw.mode.unwrap_or_else(|| "auto".to_string());
    let order = match raw.order {
        Some(names) => {
            let kinds = names
                .iter()
                .map(|name| {
                    name.parse::<StrategyKind>()
                        .map_err(|_| ConfigLoadError::UnknownStrategy { name: name.clone() })
                })
                .collect::<Result<Vec<_>>>()?;
            Some(kinds)
        }
        None => None,
    };
    let mode = ExtractionMode::from_parts(&name, order.as_deref())
        .map_err(|_| ConfigLoadError::UnknownMode { name: name.clone() })?;
    if let ExtractionMode::Auto(order) = &mode
        && order.is_empty()
    {
        return Err(ConfigLoadError::EmptyOrder);
    }
    Ok(mode)
}

fn parse_headers(
    headers: BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<HeaderTarget, Vec<String>>> {
    let mut aliases: BTreeMap<HeaderTarget, Vec<String>> = BTreeMap::new();
    for (key, list) in headers {
        let target = if normalize(&key) == HeaderTarget::Function.as_str() {
            HeaderTarget::Function
        } else {
            let field = key
                .parse::<CanonicalField>()
                .map_err(|_| ConfigLoadError::UnknownField {
                    section: "headers".to_string(),
                    key: key.clone(),
                })?;
            HeaderTarget::Field(field)
        };
        aliases.entry(target).or_default().extend(list);
    }
    Ok(aliases)
}

fn parse_phrases(
    phrases: BTreeMap<String, RawPhrases>,
) -> Result<BTreeMap<CanonicalField, FieldPhrases>> {
    let mut parsed = BTreeMap::new();
    for (key, raw) in phrases {
        let field = key
            .parse::<CanonicalField>()
            .map_err(|_| ConfigLoadError::UnknownField {
                section: "phrases".to_string(),
                key: key.clone(),
            })?;
        let keep = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .filter(|phrase| !phrase.trim().is_empty())
                .collect()
        };
        parsed.insert(
            field,
            FieldPhrases::new(keep(raw.true_phrases), keep(raw.false_phrases)),
        );
    }
    Ok(parsed)
}

fn validate_functions(functions: Vec<FunctionSpec>) -> Result<Vec<FunctionSpec>> {
    let mut seen = BTreeSet::new();
    for function in &functions {
        let key = normalize(&function.name);
        if key.is_empty() {
            return Err(ConfigLoadError::EmptyPhrase {
                section: "functions".to_string(),
                what: "function name".to_string(),
            });
        }
        if !seen.insert(key) {
            return Err(ConfigLoadError::DuplicateFunction {
                name: function.name.clone(),
            });
        }
        if function
            .subquestions
            .iter()
            .any(|subquestion| subquestion.text.trim().is_empty())
        {
            return Err(ConfigLoadError::EmptyPhrase {
                section: format!("function '{}'", function.name),
                what: "sub-question text".to_string(),
            });
        }
    }
    Ok(functions)
}

fn validate_rules(rules: Vec<Rule>) -> Result<Vec<Rule>> {
    if let Some(index) = rules.iter().position(|rule| rule.phrase.trim().is_empty()) {
        return Err(ConfigLoadError::EmptyPhrase {
            section: format!("rule {}", index + 1),
            what: "phrase".to_string(),
        });
    }
    Ok(rules)
}
