//! Price history domain models.
//!
//! Observations are read-only input produced by an external price collector.
//! The core never fetches or writes them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily close for one asset.
///
/// Duplicate or missing days are tolerated by every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub asset: String,
    pub timestamp: NaiveDate,
    pub close: Decimal,
    pub volume: Decimal,
    /// Close-to-close change in percent. `None` on the first row of a series.
    pub daily_change_pct: Option<Decimal>,
}

impl PriceObservation {
    pub fn new(asset: impl Into<String>, timestamp: NaiveDate, close: Decimal) -> Self {
        Self {
            asset: asset.into(),
            timestamp,
            close,
            volume: Decimal::ZERO,
            daily_change_pct: None,
        }
    }
}

/// Most recent close of an asset and its change against the previous close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub asset: String,
    pub timestamp: NaiveDate,
    pub close: Decimal,
    pub day_change_pct: Option<Decimal>,
}
