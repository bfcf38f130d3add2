//! Revenue and EPS extraction from free-form text.

mod parser;
pub mod rules;

pub use parser::{FinancialTextParser, ParseReport};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EarningsError;
use crate::models::earnings::ExtractionResult;

/// Trait for earnings extractors.
///
/// Extraction never fails: figures that cannot be found are left absent.
pub trait EarningsExtractor {
    /// Extract the four figures from text.
    fn extract(&self, text: &str) -> ExtractionResult;
}

/// Scope over which a rule looks for its tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Tokens must share a sentence; markers are bound to their nearest amount.
    #[default]
    Sentence,
    /// Tokens may be anywhere in the text, in rule order.
    Document,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::Sentence => f.write_str("sentence"),
            MatchPolicy::Document => f.write_str("document"),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = EarningsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentence" => Ok(MatchPolicy::Sentence),
            "document" => Ok(MatchPolicy::Document),
            other => Err(EarningsError::Config(format!(
                "unknown match policy '{other}' (expected 'sentence' or 'document')"
            ))),
        }
    }
}

/// Extract figures with the default parser.
pub fn extract(text: &str) -> ExtractionResult {
    FinancialTextParser::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Document".parse::<MatchPolicy>().unwrap(), MatchPolicy::Document);
        assert_eq!(" sentence ".parse::<MatchPolicy>().unwrap(), MatchPolicy::Sentence);
        assert!("regex".parse::<MatchPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_roundtrip() {
        for policy in [MatchPolicy::Sentence, MatchPolicy::Document] {
            assert_eq!(policy.to_string().parse::<MatchPolicy>().unwrap(), policy);
        }
    }
}
