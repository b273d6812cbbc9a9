//! Header label resolution.

use std::collections::BTreeMap;
use std::fmt;

use fnreview_model::{CanonicalField, ConfigError};

use crate::normalize::normalize;

/// Built-in label of the function-name column.
pub const FUNCTION_LABEL: &str = "function";

/// What a table column holds once its header is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderTarget {
    /// The column naming the function (or sub-question) of each row.
    Function,
    Field(CanonicalField),
}

impl HeaderTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderTarget::Function => FUNCTION_LABEL,
            HeaderTarget::Field(field) => field.as_str(),
        }
    }

    /// The built-in label that always resolves to this target.
    pub fn default_label(&self) -> &'static str {
        match self {
            HeaderTarget::Function => FUNCTION_LABEL,
            HeaderTarget::Field(field) => field.default_label(),
        }
    }

    /// Every target in column order.
    pub fn all() -> impl Iterator<Item = HeaderTarget> {
        std::iter::once(HeaderTarget::Function).chain(CanonicalField::ALL.map(HeaderTarget::Field))
    }
}

impl fmt::Display for HeaderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized header text to column target.
///
/// Built once per configuration. Two aliases that normalize to the same text
/// but point at different targets are rejected instead of overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: BTreeMap<String, HeaderTarget>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from built-in labels followed by configured aliases.
    pub fn build<B, C, S>(builtin: B, configured: C) -> Result<Self, ConfigError>
    where
        B: IntoIterator<Item = (HeaderTarget, &'static str)>,
        C: IntoIterator<Item = (HeaderTarget, S)>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for (target, label) in builtin {
            map.insert(label, target)?;
        }
        for (target, alias) in configured {
            map.insert(alias.as_ref(), target)?;
        }
        Ok(map)
    }

    /// Map holding only the built-in default label of every target.
    pub fn with_defaults() -> Self {
        let entries = HeaderTarget::all()
            .map(|target| (normalize(target.default_label()), target))
            .collect();
        Self { entries }
    }

    /// Adds one alias. Blank aliases are ignored.
    pub fn insert(&mut self, alias: &str, target: HeaderTarget) -> Result<(), ConfigError> {
        let key = normalize(alias);
        if key.is_empty() {
            return Ok(());
        }
        match self.entries.get(&key) {
            Some(existing) if *existing != target => Err(ConfigError::AmbiguousAlias {
                alias: alias.trim().to_string(),
                existing: existing.to_string(),
                conflicting: target.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.entries.insert(key, target);
                Ok(())
            }
        }
    }

    /// Resolves a raw header cell. Unknown headers yield `None`.
    pub fn resolve(&self, header: &str) -> Option<HeaderTarget> {
        self.entries.get(&normalize(header)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, HeaderTarget)> {
        self.entries.iter().map(|(alias, target)| (alias.as_str(), *target))
    }
}

/// Built-in labels of every target.
pub fn builtin_labels() -> Vec<(HeaderTarget, &'static str)> {
    HeaderTarget::all()
        .map(|target| (target, target.default_label()))
        .collect()
}
