//! Whole-document rule matching.
//!
//! Each rule compiles to `first.*?second.*?(amount)` and runs over the whole
//! case-folded text, so tokens belonging to different sentences (or to a
//! different metric) may combine into a match.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::earnings::{Field, Metric};

use super::patterns::{DOCUMENT_EPS_AMOUNT, DOCUMENT_REVENUE_AMOUNT};
use super::{FieldSpec, Rule, RuleMatcher, RuleOrder};

lazy_static! {
    static ref DOCUMENT_RULES: HashMap<(Metric, Rule), Regex> = {
        let mut rules = HashMap::new();
        for field in Field::ALL {
            let metric = field.metric();
            for rule in FieldSpec::new(field).rules {
                let regex = Regex::new(&document_pattern(metric, &rule)).unwrap();
                rules.insert((metric, rule), regex);
            }
        }
        rules
    };
}

fn document_pattern(metric: Metric, rule: &Rule) -> String {
    let amount = match metric {
        Metric::Revenue => DOCUMENT_REVENUE_AMOUNT,
        Metric::Eps => DOCUMENT_EPS_AMOUNT,
    };
    let (first, second) = match rule.order {
        RuleOrder::MetricFirst => (metric.anchor(), rule.marker.word()),
        RuleOrder::MarkerFirst => (rule.marker.word(), metric.anchor()),
    };
    format!("{first}.*?{second}.*?({amount})")
}

/// Matches rules against the whole text with unbounded gaps between tokens.
#[derive(Debug, Clone, Copy)]
pub struct DocumentMatcher<'a> {
    text: &'a str,
}

impl<'a> DocumentMatcher<'a> {
    /// Wrap case-folded text.
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl RuleMatcher for DocumentMatcher<'_> {
    fn find(&self, metric: Metric, rule: &Rule) -> Option<String> {
        let regex = DOCUMENT_RULES.get(&(metric, *rule))?;
        let caps = regex.captures(self.text)?;
        caps.get(1).map(|m| m.as_str().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::earnings::Marker;

    #[test]
    fn test_document_pattern() {
        let rule = Rule::new(RuleOrder::MarkerFirst, Marker::Reported);
        assert_eq!(
            document_pattern(Metric::Eps, &rule),
            r"reported.*?eps.*?(\$[\d,]+\.?\d*)"
        );
    }

    #[test]
    fn test_every_rule_is_compiled() {
        assert_eq!(DOCUMENT_RULES.len(), 16);
    }

    #[test]
    fn test_matches_across_sentences() {
        let matcher = DocumentMatcher::new("revenue was strong. the actual figure was $3 billion");
        let rule = Rule::new(RuleOrder::MetricFirst, Marker::Actual);
        assert_eq!(
            matcher.find(Metric::Revenue, &rule),
            Some("$3 billion".to_string())
        );
    }

    #[test]
    fn test_substring_tokens() {
        // plain substrings: "steps" contains "eps"
        let matcher = DocumentMatcher::new("next steps: actual cost $4");
        let rule = Rule::new(RuleOrder::MetricFirst, Marker::Actual);
        assert_eq!(matcher.find(Metric::Eps, &rule), Some("$4".to_string()));
    }
}
