//! Anchor and marker token extraction.

use crate::models::earnings::{Marker, Metric};

use super::patterns::{MARKER_WORD, METRIC_ANCHOR};
use super::{ExtractionMatch, FieldExtractor};

/// Finds metric anchors (`revenue`, `revenues`, `eps`).
#[derive(Debug, Default)]
pub struct AnchorExtractor;

impl FieldExtractor for AnchorExtractor {
    type Output = ExtractionMatch<Metric>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        METRIC_ANCHOR
            .find_iter(text)
            .map(|m| {
                let metric = if m.as_str() == Metric::Eps.anchor() {
                    Metric::Eps
                } else {
                    Metric::Revenue
                };
                ExtractionMatch::new(metric, m.as_str(), m.start(), m.end())
            })
            .collect()
    }
}

/// Finds marker words (`actual`, `reported`, `estimated`, `expected`).
#[derive(Debug, Default)]
pub struct MarkerExtractor;

impl FieldExtractor for MarkerExtractor {
    type Output = ExtractionMatch<Marker>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        MARKER_WORD
            .find_iter(text)
            .filter_map(|m| {
                let marker = Marker::from_word(m.as_str())?;
                Some(ExtractionMatch::new(marker, m.as_str(), m.start(), m.end()))
            })
            .collect()
    }
}
