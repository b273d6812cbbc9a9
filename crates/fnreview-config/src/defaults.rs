//! Built-in configuration used when no file is given.

use fnreview_map::HeaderTarget;
use fnreview_model::CanonicalField;

use crate::rule::Rule;

/// Function-column sentences that never name a function.
pub const BOILERPLATE: &[&str] = &["if the function is technically", "wenn die funktion technisch"];

/// Header aliases added on top of each target's built-in label.
pub fn header_aliases() -> Vec<(HeaderTarget, &'static str)> {
    use CanonicalField::{AiInvolvement, EmployerDeployment, MonitoringControl, TechnicalAvailability};
    vec![
        (HeaderTarget::Function, "function name"),
        (HeaderTarget::Function, "funktion"),
        (HeaderTarget::Function, "funktionsname"),
        (HeaderTarget::Field(TechnicalAvailability), "technically available"),
        (HeaderTarget::Field(TechnicalAvailability), "technisch vorhanden"),
        (
            HeaderTarget::Field(TechnicalAvailability),
            "steht technisch zur verfügung? \\n\\nja/nein",
        ),
        (HeaderTarget::Field(EmployerDeployment), "used by the employer"),
        (HeaderTarget::Field(EmployerDeployment), "einsatz beim arbeitgeber"),
        (
            HeaderTarget::Field(EmployerDeployment),
            "einsatzweise: soll die funktion verwendet werden? ja/nein",
        ),
        (HeaderTarget::Field(MonitoringControl), "used for monitoring"),
        (HeaderTarget::Field(MonitoringControl), "zur lv-kontrolle"),
        (
            HeaderTarget::Field(MonitoringControl),
            "soll zur überwachung von leistung oder verhalten verwendet werden? ja / nein",
        ),
        (HeaderTarget::Field(AiInvolvement), "ai involved"),
        (HeaderTarget::Field(AiInvolvement), "ki-beteiligung"),
    ]
}

/// Global true and false phrases per field.
pub fn phrases() -> Vec<(CanonicalField, &'static [&'static str], &'static [&'static str])> {
    vec![
        (
            CanonicalField::TechnicalAvailability,
            &["technically available: yes", "technisch verfügbar: ja"],
            &["technically available: no", "technisch verfügbar: nein"],
        ),
        (
            CanonicalField::EmployerDeployment,
            &["in use: yes", "im einsatz: ja"],
            &["in use: no", "im einsatz: nein"],
        ),
        (
            CanonicalField::MonitoringControl,
            &["monitoring: yes", "überwachung: ja"],
            &["monitoring: no", "überwachung: nein"],
        ),
        (
            CanonicalField::AiInvolvement,
            &["ai involved: yes", "ki-beteiligung: ja"],
            &["ai involved: no", "ki-beteiligung: nein"],
        ),
    ]
}

/// Rules for the rule strategy.
///
/// Every global phrase is also a rule at the top priority, so an explicit
/// "label: yes/no" answer is consumed before any bare label can match.
/// Negations outrank their positive phrase.
pub fn rules() -> Vec<Rule> {
    use CanonicalField::{AiInvolvement, EmployerDeployment, MonitoringControl, TechnicalAvailability};
    let mut rules: Vec<Rule> = phrases()
        .into_iter()
        .flat_map(|(field, true_phrases, false_phrases)| {
            let answered = true_phrases
                .iter()
                .map(move |phrase| (*phrase, true))
                .chain(false_phrases.iter().map(move |phrase| (*phrase, false)));
            answered.map(move |(phrase, value)| Rule::new(phrase, 30, field, value))
        })
        .collect();
    rules.extend([
        Rule::new("not technically available", 20, TechnicalAvailability, false),
        Rule::new("nicht technisch verfügbar", 20, TechnicalAvailability, false),
        Rule::new("technically available", 10, TechnicalAvailability, true),
        Rule::new("technisch verfügbar", 10, TechnicalAvailability, true),
        Rule::new("not in use", 20, EmployerDeployment, false),
        Rule::new("nicht im einsatz", 20, EmployerDeployment, false),
        Rule::new("in use", 10, EmployerDeployment, true),
        Rule::new("im einsatz", 10, EmployerDeployment, true),
        Rule::new("not used for monitoring", 20, MonitoringControl, false),
        Rule::new("keine überwachung", 20, MonitoringControl, false),
        Rule::new("used for monitoring", 10, MonitoringControl, true),
        Rule::new("zur überwachung", 10, MonitoringControl, true),
        Rule::new("no ai", 20, AiInvolvement, false),
        Rule::new("keine ki", 20, AiInvolvement, false),
        Rule::new("uses ai", 10, AiInvolvement, true),
        Rule::new("mit ki", 10, AiInvolvement, true),
    ]);
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phrase_has_a_top_priority_rule() {
        let rules = rules();
        for (field, true_phrases, false_phrases) in phrases() {
            for (phrase, value) in true_phrases
                .iter()
                .map(|p| (p, true))
                .chain(false_phrases.iter().map(|p| (p, false)))
            {
                let rule = rules
                    .iter()
                    .find(|rule| rule.phrase == *phrase)
                    .expect("rule for phrase");
                assert_eq!((rule.field, rule.value, rule.priority), (field, value, 30));
            }
        }
        assert!(rules.iter().all(|rule| rule.priority <= 30));
    }
}
