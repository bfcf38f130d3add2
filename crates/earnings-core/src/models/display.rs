//! Two-row display shape derived from an [`ExtractionResult`].

use serde::{Deserialize, Serialize};

use super::earnings::{Basis, ExtractionResult, Field, Metric};

/// Placeholder shown for fields that were not found.
pub const NOT_AVAILABLE: &str = "N/A";

/// One measure row with its estimated and actual columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "Estimated")]
    pub estimated: String,

    #[serde(rename = "Actual")]
    pub actual: String,
}

/// Presentation view: a `Revenue` row and an `EPS` row.
///
/// Recomputed from the record on every render; it holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayView {
    #[serde(rename = "Revenue")]
    pub revenue: DisplayRow,

    #[serde(rename = "EPS")]
    pub eps: DisplayRow,
}

impl DisplayView {
    /// Project a record, substituting `sentinel` for absent fields.
    pub fn with_sentinel(result: &ExtractionResult, sentinel: &str) -> Self {
        let row = |metric: Metric| DisplayRow {
            estimated: cell(result, Field::new(metric, Basis::Expected), sentinel),
            actual: cell(result, Field::new(metric, Basis::Actual), sentinel),
        };

        Self {
            revenue: row(Metric::Revenue),
            eps: row(Metric::Eps),
        }
    }

    /// Row for a given measure.
    pub fn row(&self, metric: Metric) -> &DisplayRow {
        match metric {
            Metric::Revenue => &self.revenue,
            Metric::Eps => &self.eps,
        }
    }

    /// Rows in display order, labelled.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &DisplayRow)> {
        Metric::ALL.into_iter().map(|m| (m.label(), self.row(m)))
    }
}

impl From<&ExtractionResult> for DisplayView {
    fn from(result: &ExtractionResult) -> Self {
        project(result)
    }
}

/// Project a record into the display view, using `"N/A"` for absent fields.
pub fn project(result: &ExtractionResult) -> DisplayView {
    DisplayView::with_sentinel(result, NOT_AVAILABLE)
}

fn cell(result: &ExtractionResult, field: Field, sentinel: &str) -> String {
    result.get(field).unwrap_or(sentinel).to_string()
}
