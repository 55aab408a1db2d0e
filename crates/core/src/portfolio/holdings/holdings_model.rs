use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Current position in one asset, derived from the ledger. Never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub asset: String,
    /// Sum of entry quantities.
    pub quantity: Decimal,
    /// Sum of entry values (total invested).
    pub total_value: Decimal,
    pub avg_price: Decimal,
}

/// How `Holding::avg_price` is computed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AveragePriceMethod {
    /// Arithmetic mean of entry prices, ignoring quantities.
    #[default]
    Mean,
    /// Total value divided by total quantity (average cost).
    QuantityWeighted,
}

impl FromStr for AveragePriceMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" | "simple" => Ok(AveragePriceMethod::Mean),
            "weighted" | "quantity_weighted" => Ok(AveragePriceMethod::QuantityWeighted),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown average price method '{}', expected 'mean' or 'weighted'",
                other
            ))),
        }
    }
}

impl fmt::Display for AveragePriceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AveragePriceMethod::Mean => write!(f, "mean"),
            AveragePriceMethod::QuantityWeighted => write!(f, "weighted"),
        }
    }
}
