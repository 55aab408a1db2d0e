//! Core error types for the Carteira application.
//!
//! This module defines storage-agnostic error types. File-format specific errors
//! (CSV, filesystem) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio core.
///
/// Every variant is recoverable: callers are expected to show a message and
/// let the user retry. Use [`Error::kind`] to choose the message family.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Coarse classification of [`Error`] for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied an out-of-domain value.
    Validation,
    /// An identity did not resolve to a current row.
    NotFound,
    /// Storage could not be read or written.
    Io,
    Config,
    Internal,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Ledger(LedgerError::NotFound { .. }) => ErrorKind::NotFound,
            Error::Storage(_) => ErrorKind::Io,
            Error::InvalidConfigValue(_) => ErrorKind::Config,
            Error::Unexpected(_) => ErrorKind::Internal,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Io
    }
}

/// Storage-agnostic error type for persistence operations.
///
/// Uses `String` for details so that storage backends can convert their own
/// error types into this format.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying file could not be read or written.
    #[error("I/O failure on {path}: {message}")]
    Io { path: String, message: String },

    /// The header row does not match the fixed schema.
    #[error("Schema mismatch: expected columns [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },

    /// A data row could not be decoded. Rows are never partially repaired.
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// Writing the replacement file failed; the previous contents are intact.
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(String),

    #[error("Quantity cannot be negative, got {0}")]
    NegativeQuantity(String),

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(String),

    #[error("Asset label must not be empty")]
    EmptyAsset,

    #[error("Value of {quantity} x {price} is out of range")]
    ValueOverflow { quantity: String, price: String },

    #[error("Purchase date {date} is outside [{min}, {max}]")]
    PurchaseDateOutOfRange {
        date: String,
        min: String,
        max: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(String),

    #[error("Failed to parse date: {0}")]
    DateParse(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let validation: Error = ValidationError::NonPositivePrice("0".to_string()).into();
        let not_found: Error = LedgerError::NotFound { id: 7, len: 3 }.into();
        let io: Error = StorageError::MalformedRow {
            row: 2,
            reason: "bad number".to_string(),
        }
        .into();

        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(validation.is_validation());
        assert!(not_found.is_not_found());
        assert!(io.is_io());
    }

    #[test]
    fn test_error_display_carries_details() {
        let err: Error = StorageError::SchemaMismatch {
            expected: "Ativo".to_string(),
            found: "Asset".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("Ativo"));
        assert!(msg.contains("Asset"));
    }
}
