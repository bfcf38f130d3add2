//! Rule-driven parser producing an [`ExtractionResult`].

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::earnings::ExtractionResult;

use super::rules::{DocumentMatcher, FieldSpec, RuleMatch, RuleMatcher, SentenceMatcher};
use super::{EarningsExtractor, MatchPolicy};

/// Result of a parse, with the rule that produced each field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Extracted figures.
    pub result: ExtractionResult,
    /// Winning rule per populated field, in record order.
    pub matches: Vec<RuleMatch>,
    /// Policy the parse ran with.
    pub policy: MatchPolicy,
    /// Processing time in microseconds.
    pub processing_time_us: u64,
}

/// Parser evaluating each field's rules in priority order.
#[derive(Debug, Clone, Default)]
pub struct FinancialTextParser {
    policy: MatchPolicy,
}

impl FinancialTextParser {
    /// Create a parser with the default (sentence) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_policy(config.policy)
    }

    /// Set the match policy.
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Parse text into a report.
    pub fn parse(&self, text: &str) -> ParseReport {
        let start = Instant::now();

        // Matching is case-insensitive; values are reported from the folded text
        let folded = text.to_lowercase();

        let sentence_matcher;
        let document_matcher;
        let matcher: &dyn RuleMatcher = match self.policy {
            MatchPolicy::Sentence => {
                sentence_matcher = SentenceMatcher::new(&folded);
                &sentence_matcher
            }
            MatchPolicy::Document => {
                document_matcher = DocumentMatcher::new(&folded);
                &document_matcher
            }
        };

        let mut result = ExtractionResult::new();
        let mut matches = Vec::new();

        for spec in FieldSpec::all() {
            if let Some(found) = spec.first_match(matcher) {
                debug!("{}", found);
                result.set(found.field, Some(found.value.clone()));
                matches.push(found);
            }
        }

        debug!(
            "Extracted {}/4 fields with {} policy",
            result.found_count(),
            self.policy
        );

        ParseReport {
            result,
            matches,
            policy: self.policy,
            processing_time_us: start.elapsed().as_micros() as u64,
        }
    }
}

impl EarningsExtractor for FinancialTextParser {
    fn extract(&self, text: &str) -> ExtractionResult {
        self.parse(text).result
    }
}
