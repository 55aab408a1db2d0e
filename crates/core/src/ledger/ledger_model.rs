//! Ledger domain models.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PURCHASE_DATE;
use crate::errors::ValidationError;

/// Parses a decimal string, accepting scientific notation (`1e-05`) as
/// written by dataframe tools.
pub fn parse_decimal_tolerant(value_str: &str) -> Result<Decimal, ValidationError> {
    let trimmed = value_str.trim();
    match Decimal::from_str(trimmed) {
        Ok(d) => Ok(d),
        Err(e_decimal) => Decimal::from_scientific(trimmed).map_err(|e_scientific| {
            ValidationError::DecimalParse(format!(
                "'{}' (as decimal: {}, as scientific: {})",
                value_str, e_decimal, e_scientific
            ))
        }),
    }
}

fn checked_value(quantity: Decimal, price: Decimal) -> Result<Decimal, ValidationError> {
    quantity
        .checked_mul(price)
        .ok_or_else(|| ValidationError::ValueOverflow {
            quantity: quantity.to_string(),
            price: price.to_string(),
        })
}

/// A single buy transaction.
///
/// `id` is positional: it equals the entry's 1-based position in the ledger
/// and is re-derived whenever the ledger is loaded or mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: usize,
    pub asset: String,
    pub quantity: Decimal,
    pub price: Decimal,
    /// Always `quantity * price`.
    pub value: Decimal,
    pub purchase_date: NaiveDate,
}

impl LedgerEntry {
    /// Builds an entry from stored fields, deriving `value`.
    pub fn new(
        id: usize,
        asset: impl Into<String>,
        quantity: Decimal,
        price: Decimal,
        purchase_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            asset: asset.into(),
            quantity,
            price,
            value: checked_value(quantity, price)?,
            purchase_date,
        })
    }

    /// Applies a validated update and recomputes `value`.
    ///
    /// The entry is left untouched when the new value is out of range.
    pub fn apply(&mut self, update: &LedgerEntryUpdate) -> Result<(), ValidationError> {
        let price = update.price.unwrap_or(self.price);
        let quantity = update.quantity.unwrap_or(self.quantity);
        self.value = checked_value(quantity, price)?;
        self.price = price;
        self.quantity = quantity;
        if let Some(asset) = &update.asset {
            self.asset = asset.trim().to_string();
        }
        if let Some(date) = update.purchase_date {
            self.purchase_date = date;
        }
        Ok(())
    }
}

/// Input model for appending a new ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    pub asset: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub purchase_date: NaiveDate,
}

impl NewLedgerEntry {
    pub fn new(
        asset: impl Into<String>,
        quantity: Decimal,
        price: Decimal,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            asset: asset.into(),
            quantity,
            price,
            purchase_date,
        }
    }

    /// Creation requires a label, quantity > 0 and price > 0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.asset.trim().is_empty() {
            return Err(ValidationError::EmptyAsset);
        }
        if self.quantity <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveQuantity(
                self.quantity.to_string(),
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(self.price.to_string()));
        }
        Ok(())
    }

    pub(crate) fn into_entry(self, id: usize) -> Result<LedgerEntry, ValidationError> {
        LedgerEntry::new(
            id,
            self.asset.trim(),
            self.quantity,
            self.price,
            self.purchase_date,
        )
    }
}

/// Partial update of a ledger entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryUpdate {
    pub price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub asset: Option<String>,
    pub purchase_date: Option<NaiveDate>,
}

impl LedgerEntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.quantity.is_none()
            && self.asset.is_none()
            && self.purchase_date.is_none()
    }

    /// Update allows a zero quantity but still requires price > 0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(asset) = &self.asset {
            if asset.trim().is_empty() {
                return Err(ValidationError::EmptyAsset);
            }
        }
        if let Some(quantity) = self.quantity {
            if quantity < Decimal::ZERO {
                return Err(ValidationError::NegativeQuantity(quantity.to_string()));
            }
        }
        if let Some(price) = self.price {
            if price <= Decimal::ZERO {
                return Err(ValidationError::NonPositivePrice(price.to_string()));
            }
        }
        Ok(())
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }
}

/// Checks that a purchase date lies in `[2000-01-01, today]`.
///
/// Intended for entry forms; the ledger itself accepts any calendar date.
pub fn validate_purchase_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    let (y, m, d) = MIN_PURCHASE_DATE;
    let min = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
    if date < min || date > today {
        return Err(ValidationError::PurchaseDateOutOfRange {
            date: date.to_string(),
            min: min.to_string(),
            max: today.to_string(),
        });
    }
    Ok(())
}

/// Re-derives positional ids (1-based).
pub fn reindex(entries: &mut [LedgerEntry]) {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.id = index + 1;
    }
}

/// Distinct asset labels in first-appearance order.
pub fn distinct_assets(entries: &[LedgerEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|e| seen.insert(e.asset.as_str()))
        .map(|e| e.asset.clone())
        .collect()
}
