//! Composition of the portfolio by invested value.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::portfolio::holdings::Holding;

use super::AssetAllocation;

/// Sum of invested value across holdings, saturating at `Decimal::MAX`.
pub fn total_value(holdings: &[Holding]) -> Decimal {
    holdings
        .iter()
        .fold(Decimal::ZERO, |acc, h| acc.saturating_add(h.total_value))
}

/// Weight of each holding as a percentage of total value.
///
/// Percentages are unrounded so they sum to 100 when the total is positive.
/// When the total is zero every weight is zero.
pub fn allocation(holdings: &[Holding]) -> Vec<AssetAllocation> {
    let total = total_value(holdings);
    debug!(
        "Computing allocation for {} holdings, total value {}",
        holdings.len(),
        total
    );

    holdings
        .iter()
        .map(|holding| {
            let percentage = if total > Decimal::ZERO {
                holding
                    .total_value
                    .checked_div(total)
                    .map(|share| share.saturating_mul(dec!(100)))
                    .unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            };
            AssetAllocation {
                asset: holding.asset.clone(),
                value: holding.total_value,
                percentage,
            }
        })
        .collect()
}
