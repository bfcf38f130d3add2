//! Earnings figure models: the four-slot extraction record and its vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four financial figures extracted from a paragraph.
///
/// Every slot is independent; any subset may be absent. Absent values
/// serialize as explicit `null` so the JSON shape always carries all four keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Reported (realized) revenue, e.g. `$125.5 million`.
    pub revenue_actual: Option<String>,

    /// Estimated (projected) revenue.
    pub revenue_expected: Option<String>,

    /// Reported earnings per share, e.g. `$2.45`.
    pub eps_actual: Option<String>,

    /// Estimated earnings per share.
    pub eps_expected: Option<String>,
}

impl ExtractionResult {
    /// Create an empty record with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a single field, if present.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::RevenueActual => self.revenue_actual.as_deref(),
            Field::RevenueExpected => self.revenue_expected.as_deref(),
            Field::EpsActual => self.eps_actual.as_deref(),
            Field::EpsExpected => self.eps_expected.as_deref(),
        }
    }

    pub(crate) fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::RevenueActual => &mut self.revenue_actual,
            Field::RevenueExpected => &mut self.revenue_expected,
            Field::EpsActual => &mut self.eps_actual,
            Field::EpsExpected => &mut self.eps_expected,
        };
        *slot = value;
    }

    /// Number of populated fields (0 - 4).
    pub fn found_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    /// True when no field was found.
    pub fn is_empty(&self) -> bool {
        self.found_count() == 0
    }

    /// Fields that were not found, in canonical order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }
}

/// One of the four output slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    RevenueActual,
    RevenueExpected,
    EpsActual,
    EpsExpected,
}

impl Field {
    /// All fields in canonical (record) order.
    pub const ALL: [Field; 4] = [
        Field::RevenueActual,
        Field::RevenueExpected,
        Field::EpsActual,
        Field::EpsExpected,
    ];

    pub fn new(metric: Metric, basis: Basis) -> Self {
        match (metric, basis) {
            (Metric::Revenue, Basis::Actual) => Field::RevenueActual,
            (Metric::Revenue, Basis::Expected) => Field::RevenueExpected,
            (Metric::Eps, Basis::Actual) => Field::EpsActual,
            (Metric::Eps, Basis::Expected) => Field::EpsExpected,
        }
    }

    pub fn metric(self) -> Metric {
        match self {
            Field::RevenueActual | Field::RevenueExpected => Metric::Revenue,
            Field::EpsActual | Field::EpsExpected => Metric::Eps,
        }
    }

    pub fn basis(self) -> Basis {
        match self {
            Field::RevenueActual | Field::EpsActual => Basis::Actual,
            Field::RevenueExpected | Field::EpsExpected => Basis::Expected,
        }
    }

    /// Record key, as used in the serialized result.
    pub fn key(self) -> &'static str {
        match self {
            Field::RevenueActual => "revenue_actual",
            Field::RevenueExpected => "revenue_expected",
            Field::EpsActual => "eps_actual",
            Field::EpsExpected => "eps_expected",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Financial measure being extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    Eps,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Revenue, Metric::Eps];

    /// Anchor token in case-folded text.
    pub fn anchor(self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Eps => "eps",
        }
    }

    /// Row label in the display view.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::Eps => "EPS",
        }
    }

    /// Whether amounts for this metric may carry a magnitude suffix
    /// (`billion`, `million`, `b`, `m`).
    pub fn allows_magnitude(self) -> bool {
        matches!(self, Metric::Revenue)
    }
}

/// Whether a figure is realized or projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    Actual,
    Expected,
}

impl Basis {
    /// Marker words for this basis: primary first, then the synonym.
    pub fn markers(self) -> [Marker; 2] {
        match self {
            Basis::Actual => [Marker::Actual, Marker::Reported],
            Basis::Expected => [Marker::Estimated, Marker::Expected],
        }
    }

    /// Column label in the display view.
    pub fn label(self) -> &'static str {
        match self {
            Basis::Actual => "Actual",
            Basis::Expected => "Estimated",
        }
    }
}

/// A word signalling whether an amount is realized or projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Actual,
    Reported,
    Estimated,
    Expected,
}

impl Marker {
    pub const ALL: [Marker; 4] = [
        Marker::Actual,
        Marker::Reported,
        Marker::Estimated,
        Marker::Expected,
    ];

    pub fn word(self) -> &'static str {
        match self {
            Marker::Actual => "actual",
            Marker::Reported => "reported",
            Marker::Estimated => "estimated",
            Marker::Expected => "expected",
        }
    }

    pub fn basis(self) -> Basis {
        match self {
            Marker::Actual | Marker::Reported => Basis::Actual,
            Marker::Estimated | Marker::Expected => Basis::Expected,
        }
    }

    /// Parse a case-folded marker word.
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.word() == word)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}
