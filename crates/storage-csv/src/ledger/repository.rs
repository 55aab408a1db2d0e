use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use carteira_core::ledger::{LedgerEntry, LedgerRepositoryTrait};
use carteira_core::Result;

use super::model::{LedgerRecord, LEDGER_HEADERS};
use crate::errors::{CsvStorageError, IntoCore};

/// Ledger stored as a single CSV file with a fixed header.
///
/// Writes replace the whole file: rows go to a temporary file in the same
/// directory, which is then renamed over the target.
pub struct CsvLedgerRepository {
    path: PathBuf,
}

impl CsvLedgerRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn read_entries(&self) -> std::result::Result<Vec<LedgerEntry>, CsvStorageError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let found: Vec<&str> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
            .collect();
        if found != LEDGER_HEADERS {
            return Err(CsvStorageError::SchemaMismatch {
                expected: LEDGER_HEADERS.join(","),
                found: found.join(","),
            });
        }

        let mut entries = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row = record.position().map(|p| p.line()).unwrap_or(0);
            let parsed: LedgerRecord = record.deserialize(None).map_err(|e| {
                CsvStorageError::MalformedRow {
                    row,
                    reason: e.to_string(),
                }
            })?;
            let entry = parsed
                .into_entry(entries.len() + 1)
                .map_err(|reason| CsvStorageError::MalformedRow { row, reason })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn write_entries(&self, entries: &[LedgerEntry]) -> std::result::Result<(), CsvStorageError> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file());
            writer.write_record(LEDGER_HEADERS)?;
            for entry in entries {
                writer.serialize(LedgerRecord::from(entry))?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

impl LedgerRepositoryTrait for CsvLedgerRepository {
    fn init(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        self.write_entries(&[]).into_core(&self.path)?;
        info!("Created empty ledger at {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<LedgerEntry>> {
        if !self.path.exists() {
            debug!("No ledger at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let entries = self.read_entries().into_core(&self.path)?;
        debug!(
            "Read {} ledger rows from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    fn save(&self, entries: &[LedgerEntry]) -> Result<()> {
        self.write_entries(entries).into_core(&self.path)?;
        debug!(
            "Wrote {} ledger rows to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
