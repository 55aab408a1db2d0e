//! Allocation models for portfolio breakdown by asset.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share of a single asset in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub asset: String,
    /// Total invested value of the holding.
    pub value: Decimal,
    /// Percentage of total portfolio (0-100)
    pub percentage: Decimal,
}
