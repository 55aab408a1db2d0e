use thiserror::Error;

/// Errors raised when an entry identity does not resolve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Ledger entry {id} not found (ledger has {len} entries)")]
    NotFound { id: usize, len: usize },
}

impl From<LedgerError> for String {
    fn from(error: LedgerError) -> Self {
        error.to_string()
    }
}
