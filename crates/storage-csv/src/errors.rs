//! Storage-specific error types for CSV files.
//!
//! These errors wrap `csv`, `std::io` and `tempfile` failures and are
//! converted to `carteira_core::Error` before being returned to callers.

use std::path::Path;

use carteira_core::errors::{Error, StorageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to replace file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Header mismatch: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: u64, reason: String },
}

impl CsvStorageError {
    /// Converts to the core error, naming the file involved.
    pub fn into_core_error(self, path: &Path) -> Error {
        let path = path.display().to_string();
        let storage = match self {
            CsvStorageError::Io(e) => StorageError::Io {
                path,
                message: e.to_string(),
            },
            CsvStorageError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(_) => StorageError::Io {
                    path,
                    message: e.to_string(),
                },
                _ => StorageError::MalformedRow {
                    row: e.position().map(|p| p.line() as usize).unwrap_or(0),
                    reason: e.to_string(),
                },
            },
            CsvStorageError::Persist(e) => StorageError::WriteFailed {
                path,
                message: e.to_string(),
            },
            CsvStorageError::SchemaMismatch { expected, found } => {
                StorageError::SchemaMismatch { expected, found }
            }
            CsvStorageError::MalformedRow { row, reason } => StorageError::MalformedRow {
                row: row as usize,
                reason,
            },
        };
        Error::Storage(storage)
    }
}

/// Extension trait for converting storage results to core results.
pub trait IntoCore<T> {
    fn into_core(self, path: &Path) -> carteira_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, CsvStorageError> {
    fn into_core(self, path: &Path) -> carteira_core::Result<T> {
        self.map_err(|e| e.into_core_error(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carteira_core::errors::ErrorKind;

    #[test]
    fn test_schema_mismatch_maps_to_io_kind() {
        let err = CsvStorageError::SchemaMismatch {
            expected: "Ativo".to_string(),
            found: "Asset".to_string(),
        }
        .into_core_error(Path::new("ledger.csv"));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(matches!(
            err,
            Error::Storage(StorageError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CsvStorageError::from(io).into_core_error(Path::new("/data/x.csv"));
        assert!(err.to_string().contains("/data/x.csv"));
        assert!(err.is_io());
    }
}
