//! Price history module.
//!
//! - [`model`] - Price observations and snapshots
//! - [`store`] - Storage trait for reading price history
//! - [`history`] - Window filtering, per-asset selection and change helpers

pub mod history;
pub mod model;
pub mod store;

#[cfg(test)]
mod history_tests;

pub use history::*;
pub use model::{PriceObservation, PriceSnapshot};
pub use store::PriceHistoryRepositoryTrait;
