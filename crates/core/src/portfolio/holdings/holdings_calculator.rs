use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use crate::ledger::LedgerEntry;

use super::holdings_model::{AveragePriceMethod, Holding};

#[derive(Default)]
struct HoldingAccumulator {
    quantity: Decimal,
    value: Decimal,
    price_sum: Decimal,
    count: u32,
}

impl HoldingAccumulator {
    /// Sums saturate at the `Decimal` bounds.
    fn add(&mut self, entry: &LedgerEntry) {
        self.quantity = self.quantity.saturating_add(entry.quantity);
        self.value = self.value.saturating_add(entry.value);
        self.price_sum = self.price_sum.saturating_add(entry.price);
        self.count = self.count.saturating_add(1);
    }

    fn avg_price(&self, method: AveragePriceMethod) -> Decimal {
        let (numerator, denominator) = match method {
            AveragePriceMethod::Mean => (self.price_sum, Decimal::from(self.count)),
            AveragePriceMethod::QuantityWeighted => (self.value, self.quantity),
        };
        numerator
            .checked_div(denominator)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Folds ledger entries into one holding per asset using the unweighted mean
/// price.
pub fn aggregate(entries: &[LedgerEntry]) -> Vec<Holding> {
    aggregate_with(entries, AveragePriceMethod::default())
}

/// Folds ledger entries into one holding per asset.
///
/// Grouping is by exact asset label (case-sensitive). Holdings come out in
/// first-appearance order, but callers should not depend on it.
pub fn aggregate_with(entries: &[LedgerEntry], method: AveragePriceMethod) -> Vec<Holding> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, HoldingAccumulator> = HashMap::new();

    for entry in entries {
        let acc = groups.entry(entry.asset.as_str()).or_insert_with(|| {
            order.push(entry.asset.as_str());
            HoldingAccumulator::default()
        });
        acc.add(entry);
    }

    let holdings: Vec<Holding> = order
        .into_iter()
        .filter_map(|asset| {
            groups.get(asset).map(|acc| Holding {
                asset: asset.to_string(),
                quantity: acc.quantity,
                total_value: acc.value,
                avg_price: acc.avg_price(method),
            })
        })
        .collect();

    debug!(
        "Aggregated {} ledger entries into {} holdings ({} average)",
        entries.len(),
        holdings.len(),
        method
    );
    holdings
}
