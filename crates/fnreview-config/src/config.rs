//! The immutable extraction configuration.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use fnreview_map::{AliasMap, HeaderTarget, builtin_labels, normalize};
use fnreview_model::{CanonicalField, ConfigError};

use crate::catalog::FunctionSpec;
use crate::defaults;
use crate::mode::ExtractionMode;
use crate::rule::{Rule, sort_rules};

/// Global phrases for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPhrases {
    pub true_phrases: Vec<String>,
    pub false_phrases: Vec<String>,
}

impl FieldPhrases {
    pub fn new<T, F>(true_phrases: T, false_phrases: F) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            true_phrases: true_phrases.into_iter().map(Into::into).collect(),
            false_phrases: false_phrases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.true_phrases.is_empty() && self.false_phrases.is_empty()
    }
}

/// Options for the reconciliation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOptions {
    /// Flag functions whose technical availability is not `true` while one of
    /// their sub-questions is. The reconciled values are left unchanged.
    pub flag_subquestion_availability: bool,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            flag_subquestion_availability: false,
        }
    }
}

/// Everything the extractors need, built once per run.
///
/// Header aliases are compiled into an [`AliasMap`] on insertion, so an
/// ambiguous alias is rejected before any document is read. Rules are kept
/// sorted by descending priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub mode: ExtractionMode,
    pub functions: Vec<FunctionSpec>,
    pub phrases: BTreeMap<CanonicalField, FieldPhrases>,
    pub boilerplate: Vec<String>,
    pub review: ReviewOptions,
    rules: Vec<Rule>,
    header_aliases: BTreeMap<HeaderTarget, Vec<String>>,
    alias_map: AliasMap,
}

impl ExtractionConfig {
    /// A configuration with only the built-in header labels and nothing else.
    pub fn empty() -> Self {
        Self {
            mode: ExtractionMode::default(),
            functions: Vec::new(),
            phrases: BTreeMap::new(),
            boilerplate: Vec::new(),
            review: ReviewOptions::default(),
            rules: Vec::new(),
            header_aliases: BTreeMap::new(),
            alias_map: AliasMap::with_defaults(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_functions(mut self, functions: Vec<FunctionSpec>) -> Self {
        self.functions = functions;
        self
    }

    #[must_use]
    pub fn with_function(mut self, function: FunctionSpec) -> Self {
        self.functions.push(function);
        self
    }

    #[must_use]
    pub fn with_phrases(mut self, field: CanonicalField, phrases: FieldPhrases) -> Self {
        self.phrases.insert(field, phrases);
        self
    }

    /// Replaces the rule set.
    #[must_use]
    pub fn with_rules(mut self, mut rules: Vec<Rule>) -> Self {
        sort_rules(&mut rules);
        self.rules = rules;
        self
    }

    /// Adds a header alias on top of the built-in labels.
    pub fn with_header_alias(
        mut self,
        target: HeaderTarget,
        alias: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.add_header_alias(target, alias)?;
        Ok(self)
    }

    pub fn add_header_alias(
        &mut self,
        target: HeaderTarget,
        alias: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let alias = alias.into();
        self.alias_map.insert(&alias, target)?;
        self.header_aliases.entry(target).or_default().push(alias);
        Ok(())
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Configured header aliases, without the built-in labels.
    pub fn header_aliases(&self) -> &BTreeMap<HeaderTarget, Vec<String>> {
        &self.header_aliases
    }

    pub fn alias_map(&self) -> &AliasMap {
        &self.alias_map
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|spec| spec.name == name)
    }

    pub fn phrases_for(&self, field: CanonicalField) -> Option<&FieldPhrases> {
        self.phrases.get(&field)
    }

    /// Whether a function-column cell is a known boilerplate sentence.
    pub fn is_boilerplate(&self, cell: &str) -> bool {
        let cell = normalize(cell);
        self.boilerplate
            .iter()
            .map(|sentence| normalize(sentence))
            .any(|sentence| !sentence.is_empty() && cell.starts_with(&sentence))
    }

    /// Rebuilds the alias map from the built-in labels and `aliases`.
    pub(crate) fn set_header_aliases(
        &mut self,
        aliases: BTreeMap<HeaderTarget, Vec<String>>,
    ) -> Result<(), ConfigError> {
        let configured = aliases
            .iter()
            .flat_map(|(target, list)| list.iter().map(move |alias| (*target, alias.as_str())));
        self.alias_map = AliasMap::build(builtin_labels(), configured)?;
        self.header_aliases = aliases;
        Ok(())
    }
}

/// Built-in header aliases and the map resolved from them.
///
/// The built-in lists must never collide; a collision is a programming error.
static DEFAULT_ALIASES: LazyLock<(BTreeMap<HeaderTarget, Vec<String>>, AliasMap)> =
    LazyLock::new(|| {
        let mut header_aliases: BTreeMap<HeaderTarget, Vec<String>> = BTreeMap::new();
        for (target, alias) in defaults::header_aliases() {
            header_aliases
                .entry(target)
                .or_default()
                .push(alias.to_string());
        }
        let configured = header_aliases
            .iter()
            .flat_map(|(target, list)| list.iter().map(move |alias| (*target, alias.as_str())));
        let alias_map =
            AliasMap::build(builtin_labels(), configured).expect("Invalid built-in header aliases");
        (header_aliases, alias_map)
    });

impl Default for ExtractionConfig {
    /// Built-in labels, English and German phrases and rules, no functions.
    fn default() -> Self {
        let phrases = defaults::phrases()
            .into_iter()
            .map(|(field, true_phrases, false_phrases)| {
                (
                    field,
                    FieldPhrases::new(true_phrases.iter().copied(), false_phrases.iter().copied()),
                )
            })
            .collect();
        let (header_aliases, alias_map) = DEFAULT_ALIASES.clone();

        let mut rules = defaults::rules();
        sort_rules(&mut rules);

        Self {
            mode: ExtractionMode::default(),
            functions: Vec::new(),
            phrases,
            boilerplate: defaults::BOILERPLATE.iter().map(ToString::to_string).collect(),
            review: ReviewOptions::default(),
            rules,
            header_aliases,
            alias_map,
        }
    }
}
