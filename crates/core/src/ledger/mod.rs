//! Ledger module - transaction entries, the ledger service, and repository traits.

mod ledger_errors;
mod ledger_model;
mod ledger_service;
mod ledger_traits;



pub use ledger_errors::LedgerError;
pub use ledger_model::{
    distinct_assets, parse_decimal_tolerant, reindex, validate_purchase_date, LedgerEntry,
    LedgerEntryUpdate, NewLedgerEntry,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
