use super::ledger_model::*;
use crate::Result;

/// Trait defining the contract for ledger persistence.
///
/// Implementations store the full sequence; `save` replaces the previous
/// contents in a single step.
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Creates empty storage with the fixed schema if none exists yet.
    fn init(&self) -> Result<()>;
    /// Returns the stored entries with positional ids, or an empty vector
    /// when no storage exists.
    fn load(&self) -> Result<Vec<LedgerEntry>>;
    fn save(&self, entries: &[LedgerEntry]) -> Result<()>;
}

/// Trait defining the contract for ledger operations.
pub trait LedgerServiceTrait {
    fn entries(&self) -> &[LedgerEntry];
    fn get(&self, id: usize) -> Result<&LedgerEntry>;
    fn append(&mut self, new_entry: NewLedgerEntry) -> Result<LedgerEntry>;
    fn update(&mut self, id: usize, update: LedgerEntryUpdate) -> Result<LedgerEntry>;
    fn remove(&mut self, id: usize) -> Result<LedgerEntry>;
    fn persist(&self) -> Result<()>;
    /// Monotonic counter bumped by every successful mutation.
    fn version(&self) -> u64;
}
