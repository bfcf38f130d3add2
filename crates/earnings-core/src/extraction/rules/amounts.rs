//! Currency amount extraction.

use crate::models::earnings::Metric;

use super::patterns::CURRENCY_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// A currency amount split into its number and optional magnitude word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    /// Symbol and digits, e.g. `$125.5`.
    pub number: String,
    /// Magnitude word, e.g. `million` or `m`.
    pub magnitude: Option<String>,
}

impl ExtractionMatch<CurrencyAmount> {
    /// Text reported for a metric: revenue keeps the magnitude suffix as
    /// written, EPS reports the plain number.
    pub fn text_for(&self, metric: Metric) -> &str {
        if metric.allows_magnitude() {
            self.source.trim()
        } else {
            &self.value.number
        }
    }
}

/// Currency amount extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<CurrencyAmount>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CURRENCY_AMOUNT
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let amount = CurrencyAmount {
                    number: caps.name("number")?.as_str().to_string(),
                    magnitude: caps.name("magnitude").map(|m| m.as_str().to_string()),
                };
                Some(ExtractionMatch::new(
                    amount,
                    full_match.as_str(),
                    full_match.start(),
                    full_match.end(),
                ))
            })
            .collect()
    }
}
