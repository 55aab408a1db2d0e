//! Carteira Core - Domain entities, services, and traits.
//!
//! This crate contains the core logic for Carteira: the transaction ledger,
//! holdings aggregation, and the price-history analytics used for growth and
//! return charts. It is storage-agnostic and defines traits that are
//! implemented by the `storage-csv` crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod portfolio;
pub mod quotes;
pub mod state;
pub mod utils;

// Re-export common types from the portfolio module
pub use portfolio::*;

pub use config::CoreConfig;
pub use state::PortfolioState;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
