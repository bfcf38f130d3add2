//! Core library for extracting earnings figures from financial prose.
//!
//! This crate provides:
//! - Rule-based extraction of actual/expected revenue and EPS
//! - A fixed-shape result record and its two-row display projection
//! - JSON configuration for extraction policy and display defaults

pub mod error;
pub mod extraction;
pub mod models;

pub use error::{EarningsError, Result};
pub use extraction::{extract, EarningsExtractor, FinancialTextParser, MatchPolicy, ParseReport};
pub use models::config::{DisplayConfig, EarningsConfig, ExtractionConfig};
pub use models::display::{project, DisplayRow, DisplayView, NOT_AVAILABLE};
pub use models::earnings::{Basis, ExtractionResult, Field, Marker, Metric};
