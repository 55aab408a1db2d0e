//! Holdings module - per-asset positions derived from the ledger.

mod holdings_calculator;
mod holdings_model;


pub use holdings_calculator::{aggregate, aggregate_with};
pub use holdings_model::{AveragePriceMethod, Holding};
