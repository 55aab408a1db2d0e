//! CSV storage implementation for price history.

mod model;
mod repository;

pub use model::{parse_observation_date, PRICE_REQUIRED_COLUMNS};
pub use repository::CsvPriceHistoryRepository;
