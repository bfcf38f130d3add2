//! Sentence-scoped rule matching.
//!
//! Each sentence is annotated with its anchors, markers and amounts. Every
//! marker is bound to at most one amount:
//!
//! - an amount written directly before a marker (`$150m actual`) belongs to
//!   that marker;
//! - otherwise a marker takes the first later amount in the sentence that is
//!   not already claimed that way (`actual revenue of $125.5 million`).
//!
//! A rule is satisfied when its anchor and a bound marker appear in the
//! rule's order within one sentence. Any amount of text may separate them.

use tracing::trace;

use crate::models::earnings::{Marker, Metric};

use super::amounts::{AmountExtractor, CurrencyAmount};
use super::patterns::{ABBREVIATIONS, SENTENCE_BREAK};
use super::tokens::{AnchorExtractor, MarkerExtractor};
use super::{ExtractionMatch, FieldExtractor, Rule, RuleMatcher, RuleOrder};

/// Split text into sentences, skipping empty ones.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for brk in SENTENCE_BREAK.find_iter(text) {
        let before = &text[start..brk.start()];
        if brk.end() < text.len() && ends_with_abbreviation(before, brk.as_str()) {
            continue;
        }
        push_sentence(&mut sentences, before);
        start = brk.end();
    }
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, sentence: &'a str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

fn ends_with_abbreviation(before: &str, terminator: &str) -> bool {
    if terminator.trim_end() != "." {
        return false;
    }
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    ABBREVIATIONS.contains(&word)
}

#[derive(Debug, Clone)]
struct BoundMarker {
    marker: Marker,
    start: usize,
    end: usize,
    amount: Option<usize>,
}

/// A sentence with its tokens located and markers bound to amounts.
#[derive(Debug, Clone)]
pub struct AnnotatedSentence {
    anchors: Vec<ExtractionMatch<Metric>>,
    markers: Vec<BoundMarker>,
    amounts: Vec<ExtractionMatch<CurrencyAmount>>,
}

impl AnnotatedSentence {
    pub fn annotate(sentence: &str) -> Self {
        let anchors = AnchorExtractor.extract_all(sentence);
        let amounts = AmountExtractor::new().extract_all(sentence);
        let mut markers: Vec<BoundMarker> = MarkerExtractor
            .extract_all(sentence)
            .into_iter()
            .map(|m| BoundMarker {
                marker: m.value,
                start: m.start,
                end: m.end,
                amount: None,
            })
            .collect();

        // Amounts written directly before a marker
        let mut claimed = vec![false; amounts.len()];
        for (i, amount) in amounts.iter().enumerate() {
            let Some(next) = markers.iter_mut().find(|m| m.start >= amount.end) else {
                continue;
            };
            let gap = &sentence[amount.end..next.start];
            if next.amount.is_none() && gap.chars().all(|c| c.is_whitespace() || c == '(') {
                next.amount = Some(i);
                claimed[i] = true;
            }
        }

        // Remaining markers take the next unclaimed amount
        for marker in markers.iter_mut().filter(|m| m.amount.is_none()) {
            marker.amount = amounts
                .iter()
                .enumerate()
                .find(|(i, a)| !claimed[*i] && a.start >= marker.end)
                .map(|(i, _)| i);
        }

        Self {
            anchors,
            markers,
            amounts,
        }
    }

    /// Amount bound to the first marker satisfying `rule` for `metric`.
    pub fn satisfy(&self, metric: Metric, rule: &Rule) -> Option<&ExtractionMatch<CurrencyAmount>> {
        let anchors = self.anchors.iter().filter(|a| a.value == metric);
        let mut bound = self
            .markers
            .iter()
            .filter(|m| m.marker == rule.marker)
            .filter_map(|m| m.amount.map(|i| (m, &self.amounts[i])));

        match rule.order {
            RuleOrder::MetricFirst => {
                let first_anchor_end = anchors.map(|a| a.end).min()?;
                bound
                    .find(|(m, _)| m.start >= first_anchor_end)
                    .map(|(_, amount)| amount)
            }
            RuleOrder::MarkerFirst => {
                let last_anchor_start = anchors.map(|a| a.start).max()?;
                bound
                    .find(|(m, _)| m.end <= last_anchor_start)
                    .map(|(_, amount)| amount)
            }
        }
    }
}

/// Matches rules sentence by sentence, left to right.
#[derive(Debug, Clone)]
pub struct SentenceMatcher {
    sentences: Vec<AnnotatedSentence>,
}

impl SentenceMatcher {
    /// Annotate case-folded text.
    pub fn new(text: &str) -> Self {
        let sentences: Vec<_> = split_sentences(text)
            .into_iter()
            .map(AnnotatedSentence::annotate)
            .collect();
        trace!("Annotated {} sentences", sentences.len());
        Self { sentences }
    }
}

impl RuleMatcher for SentenceMatcher {
    fn find(&self, metric: Metric, rule: &Rule) -> Option<String> {
        self.sentences
            .iter()
            .find_map(|s| s.satisfy(metric, rule))
            .map(|amount| amount.text_for(metric).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("revenue was $2.5 billion. eps was $1.10!\n\nguidance raised");
        assert_eq!(
            sentences,
            vec!["revenue was $2.5 billion", "eps was $1.10", "guidance raised"]
        );
    }

    #[test]
    fn test_abbreviation_does_not_split() {
        let sentences = split_sentences("revenue was $150m actual vs. $145m estimated. done");
        assert_eq!(
            sentences,
            vec!["revenue was $150m actual vs. $145m estimated", "done"]
        );
    }

    #[test]
    fn test_semicolon_does_not_split() {
        assert_eq!(
            split_sentences("revenue: actual $5 billion; estimated $4.8 billion."),
            vec!["revenue: actual $5 billion; estimated $4.8 billion"]
        );
    }

    #[test]
    fn test_decimal_point_does_not_split() {
        assert_eq!(split_sentences("eps of $2.45 actual"), vec!["eps of $2.45 actual"]);
    }

    #[test]
    fn test_postfix_binding() {
        let sentence = AnnotatedSentence::annotate("eps was $2.45 actual versus $2.30 estimated");

        let actual = Rule::new(RuleOrder::MetricFirst, Marker::Actual);
        let estimated = Rule::new(RuleOrder::MetricFirst, Marker::Estimated);
        assert_eq!(sentence.satisfy(Metric::Eps, &actual).unwrap().source, "$2.45");
        assert_eq!(sentence.satisfy(Metric::Eps, &estimated).unwrap().source, "$2.30");
    }

    #[test]
    fn test_prefix_binding() {
        let sentence = AnnotatedSentence::annotate(
            "actual revenue of $125.5 million compared to estimated revenue of $120 million",
        );

        let actual = Rule::new(RuleOrder::MarkerFirst, Marker::Actual);
        let estimated = Rule::new(RuleOrder::MetricFirst, Marker::Estimated);
        assert_eq!(
            sentence.satisfy(Metric::Revenue, &actual).unwrap().source,
            "$125.5 million"
        );
        assert_eq!(
            sentence.satisfy(Metric::Revenue, &estimated).unwrap().source,
            "$120 million"
        );
    }

    #[test]
    fn test_parenthesized_marker_binds_postfix() {
        let sentence = AnnotatedSentence::annotate("revenue of $10m (reported) and $9m (expected)");
        let reported = Rule::new(RuleOrder::MetricFirst, Marker::Reported);
        assert_eq!(sentence.satisfy(Metric::Revenue, &reported).unwrap().source, "$10m");
    }

    #[test]
    fn test_rule_order_is_respected() {
        let sentence = AnnotatedSentence::annotate("actual revenue of $5 million");
        let metric_first = Rule::new(RuleOrder::MetricFirst, Marker::Actual);
        assert!(sentence.satisfy(Metric::Revenue, &metric_first).is_none());
    }

    #[test]
    fn test_marker_without_amount() {
        let sentence = AnnotatedSentence::annotate("revenue came in above expected levels");
        let rule = Rule::new(RuleOrder::MetricFirst, Marker::Expected);
        assert!(sentence.satisfy(Metric::Revenue, &rule).is_none());
    }

    #[test]
    fn test_matcher_scans_sentences_in_order() {
        let matcher = SentenceMatcher::new(
            "eps actual came in at $1.00. later, eps actual was restated to $0.90.",
        );
        let rule = Rule::new(RuleOrder::MetricFirst, Marker::Actual);

        assert_eq!(matcher.sentences.len(), 2);
        assert_eq!(matcher.find(Metric::Eps, &rule), Some("$1.00".to_string()));
    }
}
