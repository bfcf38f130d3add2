//! Common regex patterns for earnings text extraction.
//!
//! All patterns expect case-folded (lowercase) input.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Currency amount: symbol, digits with optional thousands separators and
    // fraction, then an optional magnitude word.
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"(?P<number>[$€£¥]\d+(?:,\d{3})*(?:\.\d+)?)(?:\s*(?P<magnitude>billion|million|b|m)\b)?"
    ).unwrap();

    // Metric anchors ("revenues" counts as revenue)
    pub static ref METRIC_ANCHOR: Regex = Regex::new(
        r"\b(revenues?|eps)\b"
    ).unwrap();

    // Realized / projected marker words
    pub static ref MARKER_WORD: Regex = Regex::new(
        r"\b(actual|reported|estimated|expected)\b"
    ).unwrap();

    // Sentence terminator or blank line
    pub static ref SENTENCE_BREAK: Regex = Regex::new(
        r"[.!?]+(?:\s+|$)|\n[ \t]*\n"
    ).unwrap();
}

/// Source amount pattern for revenue: `$` amount with an optional magnitude.
pub const DOCUMENT_REVENUE_AMOUNT: &str = r"\$[\d,]+\.?\d*\s*(?:billion|million|b|m)?";

/// Source amount pattern for EPS: a plain `$` amount.
pub const DOCUMENT_EPS_AMOUNT: &str = r"\$[\d,]+\.?\d*";

/// Words ending in a period that do not end a sentence.
pub const ABBREVIATIONS: &[&str] = &[
    "vs", "inc", "corp", "co", "ltd", "approx", "no", "e.g", "i.e", "u.s", "mr", "ms", "dr",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_amount_groups() {
        let caps = CURRENCY_AMOUNT.captures("came in at $1,250.75 million").unwrap();
        assert_eq!(&caps["number"], "$1,250.75");
        assert_eq!(caps.name("magnitude").map(|m| m.as_str()), Some("million"));
        assert_eq!(&caps[0], "$1,250.75 million");
    }

    #[test]
    fn test_magnitude_needs_word_boundary() {
        let caps = CURRENCY_AMOUNT.captures("$5 more than").unwrap();
        assert_eq!(&caps[0], "$5");
        assert!(caps.name("magnitude").is_none());
    }

    #[test]
    fn test_trailing_punctuation_not_captured() {
        assert_eq!(CURRENCY_AMOUNT.find("$150, then").unwrap().as_str(), "$150");
        assert_eq!(CURRENCY_AMOUNT.find("was $125.").unwrap().as_str(), "$125");
    }

    #[test]
    fn test_anchor_is_whole_word() {
        assert!(METRIC_ANCHOR.is_match("total revenues rose"));
        assert!(METRIC_ANCHOR.is_match("eps was"));
        assert!(!METRIC_ANCHOR.is_match("next steps"));
    }
}
