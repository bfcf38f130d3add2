//! Rule-based field extraction for revenue and EPS figures.

pub mod amounts;
pub mod document;
pub mod patterns;
pub mod sentences;
pub mod tokens;

pub use amounts::{AmountExtractor, CurrencyAmount};
pub use document::DocumentMatcher;
pub use sentences::{split_sentences, AnnotatedSentence, SentenceMatcher};
pub use tokens::{AnchorExtractor, MarkerExtractor};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::earnings::{Field, Marker, Metric};

/// Trait for token extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in text together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Source text that was matched.
    pub source: String,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value,
            source: source.into(),
            start,
            end,
        }
    }
}

/// Relative order of the anchor and marker tokens a rule requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOrder {
    /// `revenue ... actual ... $amount`
    MetricFirst,
    /// `actual ... revenue ... $amount`
    MarkerFirst,
}

/// A single candidate rule: an ordering crossed with one marker word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub order: RuleOrder,
    pub marker: Marker,
}

impl Rule {
    pub fn new(order: RuleOrder, marker: Marker) -> Self {
        Self { order, marker }
    }

    /// Human-readable form for a metric, e.g. `revenue..actual..$`.
    pub fn describe(&self, metric: Metric) -> String {
        match self.order {
            RuleOrder::MetricFirst => format!("{}..{}..$", metric.anchor(), self.marker),
            RuleOrder::MarkerFirst => format!("{}..{}..$", self.marker, metric.anchor()),
        }
    }
}

/// Decides whether a rule is satisfied and returns the captured amount.
pub trait RuleMatcher {
    fn find(&self, metric: Metric, rule: &Rule) -> Option<String>;
}

/// The winning rule for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub field: Field,
    pub rule: Rule,
    pub value: String,
}

impl fmt::Display for RuleMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.field,
            self.rule.describe(self.field.metric()),
            self.value
        )
    }
}

/// Ordered candidate rules for one output field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub rules: [Rule; 4],
}

impl FieldSpec {
    /// Rules in priority order: metric-first with the primary marker,
    /// marker-first with the primary marker, then the same for the synonym.
    pub fn new(field: Field) -> Self {
        let [primary, secondary] = field.basis().markers();
        Self {
            field,
            rules: [
                Rule::new(RuleOrder::MetricFirst, primary),
                Rule::new(RuleOrder::MarkerFirst, primary),
                Rule::new(RuleOrder::MetricFirst, secondary),
                Rule::new(RuleOrder::MarkerFirst, secondary),
            ],
        }
    }

    /// One spec per output field, in record order.
    pub fn all() -> [FieldSpec; 4] {
        Field::ALL.map(FieldSpec::new)
    }

    /// Evaluate rules in order; the first satisfied rule wins.
    pub fn first_match(&self, matcher: &dyn RuleMatcher) -> Option<RuleMatch> {
        let metric = self.field.metric();

        self.rules.iter().find_map(|rule| {
            let value = matcher.find(metric, rule)?;
            let value = value.trim();
            trace!("{} satisfied by {}", self.field, rule.describe(metric));
            Some(RuleMatch {
                field: self.field,
                rule: *rule,
                value: value.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedMatcher(Vec<(Rule, &'static str)>);

    impl RuleMatcher for FixedMatcher {
        fn find(&self, _metric: Metric, rule: &Rule) -> Option<String> {
            self.0
                .iter()
                .find(|(r, _)| r == rule)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_rule_priority_order() {
        let spec = FieldSpec::new(Field::RevenueExpected);
        assert_eq!(
            spec.rules,
            [
                Rule::new(RuleOrder::MetricFirst, Marker::Estimated),
                Rule::new(RuleOrder::MarkerFirst, Marker::Estimated),
                Rule::new(RuleOrder::MetricFirst, Marker::Expected),
                Rule::new(RuleOrder::MarkerFirst, Marker::Expected),
            ]
        );
    }

    #[test]
    fn test_first_satisfied_rule_wins() {
        let matcher = FixedMatcher(vec![
            (Rule::new(RuleOrder::MarkerFirst, Marker::Reported), "$3"),
            (Rule::new(RuleOrder::MarkerFirst, Marker::Actual), " $2 "),
        ]);

        let found = FieldSpec::new(Field::EpsActual).first_match(&matcher).unwrap();
        assert_eq!(found.rule, Rule::new(RuleOrder::MarkerFirst, Marker::Actual));
        assert_eq!(found.value, "$2");
    }

    #[test]
    fn test_no_rule_satisfied() {
        let matcher = FixedMatcher(Vec::new());
        assert!(FieldSpec::new(Field::RevenueActual).first_match(&matcher).is_none());
    }

    #[test]
    fn test_rule_description() {
        let rule = Rule::new(RuleOrder::MarkerFirst, Marker::Reported);
        assert_eq!(rule.describe(Metric::Eps), "reported..eps..$");
    }
}
