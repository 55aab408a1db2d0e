use std::path::{Path, PathBuf};

use log::debug;

use carteira_core::ledger::parse_decimal_tolerant;
use carteira_core::quotes::{PriceHistoryRepositoryTrait, PriceObservation};
use carteira_core::Result;

use super::model::{is_missing, parse_observation_date, PRICE_REQUIRED_COLUMNS};
use crate::errors::{CsvStorageError, IntoCore};

struct ColumnIndex {
    datetime: usize,
    close: usize,
    volume: usize,
    ticker: usize,
    change: usize,
}

/// Read-only price history file produced by the external price collector.
pub struct CsvPriceHistoryRepository {
    path: PathBuf,
}

impl CsvPriceHistoryRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn column_index(headers: &csv::StringRecord) -> std::result::Result<ColumnIndex, CsvStorageError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let missing = || CsvStorageError::SchemaMismatch {
            expected: PRICE_REQUIRED_COLUMNS.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        };
        let [datetime, close, volume, ticker, change] = PRICE_REQUIRED_COLUMNS;
        Ok(ColumnIndex {
            datetime: position(datetime).ok_or_else(missing)?,
            close: position(close).ok_or_else(missing)?,
            volume: position(volume).ok_or_else(missing)?,
            ticker: position(ticker).ok_or_else(missing)?,
            change: position(change).ok_or_else(missing)?,
        })
    }

    fn read_observations(&self) -> std::result::Result<Vec<PriceObservation>, CsvStorageError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(&self.path)?;
        let columns = Self::column_index(reader.headers()?)?;

        let mut observations = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row = record.position().map(|p| p.line()).unwrap_or(0);
            let malformed = |reason: String| CsvStorageError::MalformedRow { row, reason };
            let field = |index: usize| record.get(index).unwrap_or("");

            let asset = field(columns.ticker).trim();
            if asset.is_empty() {
                return Err(malformed("empty Ticker".to_string()));
            }
            let timestamp = parse_observation_date(field(columns.datetime))
                .ok_or_else(|| malformed(format!("Datetime '{}'", field(columns.datetime))))?;
            let close = parse_decimal_tolerant(field(columns.close))
                .map_err(|e| malformed(format!("Close: {}", e)))?;
            let volume = parse_decimal_tolerant(field(columns.volume))
                .map_err(|e| malformed(format!("Volume: {}", e)))?;
            let change_raw = field(columns.change);
            let daily_change_pct = if is_missing(change_raw) {
                None
            } else {
                Some(
                    parse_decimal_tolerant(change_raw)
                        .map_err(|e| malformed(format!("variacao: {}", e)))?,
                )
            };

            observations.push(PriceObservation {
                asset: asset.to_string(),
                timestamp,
                close,
                volume,
                daily_change_pct,
            });
        }
        Ok(observations)
    }
}

impl PriceHistoryRepositoryTrait for CsvPriceHistoryRepository {
    fn load_observations(&self) -> Result<Vec<PriceObservation>> {
        if !self.path.exists() {
            debug!("No price history at {}", self.path.display());
            return Ok(Vec::new());
        }
        let observations = self.read_observations().into_core(&self.path)?;
        debug!(
            "Read {} price observations from {}",
            observations.len(),
            self.path.display()
        );
        Ok(observations)
    }
}
