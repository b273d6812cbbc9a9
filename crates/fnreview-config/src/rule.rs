use fnreview_model::CanonicalField;
use serde::{Deserialize, Serialize};

/// Which text blocks a rule applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    #[default]
    Any,
    /// Main function blocks only.
    Function,
    /// Sub-question blocks only.
    Subquestion,
}

impl RuleScope {
    pub fn applies_to(&self, is_subquestion: bool) -> bool {
        match self {
            RuleScope::Any => true,
            RuleScope::Function => !is_subquestion,
            RuleScope::Subquestion => is_subquestion,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, RuleScope::Any)
    }
}

/// Phrase that, when found in a block, sets one field to a fixed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub phrase: String,
    #[serde(default)]
    pub priority: i32,
    pub field: CanonicalField,
    pub value: bool,
    #[serde(default, skip_serializing_if = "RuleScope::is_any")]
    pub scope: RuleScope,
}

impl Rule {
    pub fn new(phrase: impl Into<String>, priority: i32, field: CanonicalField, value: bool) -> Self {
        Self {
            name: None,
            phrase: phrase.into(),
            priority,
            field,
            value,
            scope: RuleScope::Any,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn scoped(mut self, scope: RuleScope) -> Self {
        self.scope = scope;
        self
    }

    /// Label used in logs: the rule name or its phrase.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.phrase)
    }
}

/// Sorts rules by descending priority, keeping declaration order for ties.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by_key(|rule| std::cmp::Reverse(rule.priority));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_is_stable_within_priority() {
        let mut rules = vec![
            Rule::new("a", 1, CanonicalField::AiInvolvement, true),
            Rule::new("b", 5, CanonicalField::AiInvolvement, true),
            Rule::new("c", 1, CanonicalField::AiInvolvement, false),
            Rule::new("d", 5, CanonicalField::AiInvolvement, false),
        ];
        sort_rules(&mut rules);
        let order: Vec<_> = rules.iter().map(|r| r.phrase.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn scope_filters_blocks() {
        assert!(RuleScope::Any.applies_to(true));
        assert!(RuleScope::Function.applies_to(false));
        assert!(!RuleScope::Function.applies_to(true));
        assert!(RuleScope::Subquestion.applies_to(true));
    }
}
