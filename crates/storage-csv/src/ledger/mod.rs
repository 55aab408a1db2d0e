//! CSV storage implementation for the ledger.

mod model;
mod repository;

pub use model::{LedgerRecord, LEDGER_HEADERS};
pub use repository::CsvLedgerRepository;
