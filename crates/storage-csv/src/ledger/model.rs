//! File model for ledger rows.

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use carteira_core::constants::{DECIMAL_PRECISION, LEDGER_DATE_FORMAT};
use carteira_core::ledger::{parse_decimal_tolerant, LedgerEntry};

/// Fixed ledger header, in column order.
pub const LEDGER_HEADERS: [&str; 5] = ["Ativo", "Quantidade", "Preço", "Valor", "Data de Compra"];

/// One ledger row as stored on disk. Numbers and dates stay as text until
/// converted so that parse failures can be reported per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(rename = "Ativo")]
    pub asset: String,
    #[serde(rename = "Quantidade")]
    pub quantity: String,
    #[serde(rename = "Preço")]
    pub price: String,
    #[serde(rename = "Valor")]
    pub value: String,
    #[serde(rename = "Data de Compra")]
    pub purchase_date: String,
}

impl From<&LedgerEntry> for LedgerRecord {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            asset: entry.asset.clone(),
            quantity: entry.quantity.normalize().to_string(),
            price: entry.price.normalize().to_string(),
            value: entry.value.normalize().to_string(),
            purchase_date: entry.purchase_date.format(LEDGER_DATE_FORMAT).to_string(),
        }
    }
}

impl LedgerRecord {
    /// Converts to a domain entry with the given positional id.
    ///
    /// `Valor` is re-derived from quantity and price; a stored value that
    /// disagrees is logged and ignored. Rows that no ledger mutation could
    /// have produced (negative quantity, non-positive price) are rejected.
    pub fn into_entry(self, id: usize) -> Result<LedgerEntry, String> {
        let asset = self.asset.trim();
        if asset.is_empty() {
            return Err("empty Ativo".to_string());
        }
        let quantity =
            parse_decimal_tolerant(&self.quantity).map_err(|e| format!("Quantidade: {}", e))?;
        let price = parse_decimal_tolerant(&self.price).map_err(|e| format!("Preço: {}", e))?;
        let stored_value =
            parse_decimal_tolerant(&self.value).map_err(|e| format!("Valor: {}", e))?;
        let purchase_date = parse_purchase_date(&self.purchase_date)?;
        if quantity < Decimal::ZERO {
            return Err(format!("Quantidade {} is negative", quantity));
        }
        if price <= Decimal::ZERO {
            return Err(format!("Preço {} is not positive", price));
        }

        let entry = LedgerEntry::new(id, asset, quantity, price, purchase_date)
            .map_err(|e| e.to_string())?;
        let tolerance = Decimal::new(1, DECIMAL_PRECISION);
        if entry.value.saturating_sub(stored_value).abs() > tolerance {
            warn!(
                "Ledger row {} stores Valor {} but Quantidade x Preço is {}; using the latter",
                id, stored_value, entry.value
            );
        }
        Ok(entry)
    }
}

fn parse_purchase_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, LEDGER_DATE_FORMAT)
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .map_err(|e| format!("Data de Compra '{}': {}", raw, e))
}
