//! CSV file storage implementation for Carteira.
//!
//! This crate implements the repository traits defined in `carteira-core`
//! on top of plain CSV files:
//! - the transaction ledger (`Ativo,Quantidade,Preço,Valor,Data de Compra`)
//! - the daily price history written by the external price collector
//!
//! ```text
//!          core (domain)
//!               │
//!               ▼
//!     storage-csv (this crate)
//!               │
//!               ▼
//!   lancamentos.csv   stocks.csv
//! ```

pub mod errors;
pub mod ledger;
pub mod quotes;

use std::sync::Arc;

use log::info;

use carteira_core::config::CoreConfig;
use carteira_core::ledger::LedgerService;
use carteira_core::quotes::{PriceHistoryRepositoryTrait, PriceObservation};
use carteira_core::PortfolioState;

pub use errors::{CsvStorageError, IntoCore};
pub use ledger::CsvLedgerRepository;
pub use quotes::CsvPriceHistoryRepository;

// Re-export from carteira-core for convenience
pub use carteira_core::errors::{Error, Result, StorageError};

/// Opens (creating if needed) the ledger file named by the configuration and
/// wraps it in application state.
pub fn open_portfolio(config: &CoreConfig) -> Result<PortfolioState> {
    let repository = Arc::new(CsvLedgerRepository::new(&config.ledger_path));
    let ledger = LedgerService::new(repository)?;
    info!(
        "Opened ledger {} with {} entries",
        config.ledger_path.display(),
        ledger.len()
    );
    Ok(PortfolioState::new(ledger, config.avg_price_method))
}

/// Reads the price history file named by the configuration.
pub fn load_price_history(config: &CoreConfig) -> Result<Vec<PriceObservation>> {
    CsvPriceHistoryRepository::new(&config.prices_path).load_observations()
}
