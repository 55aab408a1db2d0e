use log::{debug, info, warn};
use std::sync::Arc;

use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_model::*;
use crate::ledger::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::Result;

/// Service owning the in-memory ledger and keeping it in sync with storage.
///
/// Every successful mutation is written through the repository. When the
/// write fails the in-memory change is rolled back.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    entries: Vec<LedgerEntry>,
    version: u64,
}

impl LedgerService {
    /// Initializes storage if missing and loads the current entries.
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>) -> Result<Self> {
        repository.init()?;
        let mut entries = repository.load()?;
        reindex(&mut entries);
        debug!("Loaded ledger with {} entries", entries.len());
        Ok(Self {
            repository,
            entries,
            version: 0,
        })
    }

    /// Discards in-memory state and reads storage again.
    pub fn reload(&mut self) -> Result<()> {
        let mut entries = self.repository.load()?;
        reindex(&mut entries);
        self.entries = entries;
        self.version += 1;
        debug!("Reloaded ledger with {} entries", self.entries.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct asset labels in first-appearance order.
    pub fn assets(&self) -> Vec<String> {
        distinct_assets(&self.entries)
    }

    fn index_of(&self, id: usize) -> Result<usize> {
        if id == 0 || id > self.entries.len() {
            return Err(LedgerError::NotFound {
                id,
                len: self.entries.len(),
            }
            .into());
        }
        Ok(id - 1)
    }
}

impl LedgerServiceTrait for LedgerService {
    fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    fn get(&self, id: usize) -> Result<&LedgerEntry> {
        let index = self.index_of(id)?;
        Ok(&self.entries[index])
    }

    fn append(&mut self, new_entry: NewLedgerEntry) -> Result<LedgerEntry> {
        new_entry.validate()?;
        let entry = new_entry.into_entry(self.entries.len() + 1)?;
        self.entries.push(entry.clone());

        if let Err(e) = self.persist() {
            warn!("Append of '{}' not persisted, rolling back: {}", entry.asset, e);
            self.entries.pop();
            return Err(e);
        }

        self.version += 1;
        info!(
            "Appended ledger entry {} ({} x {} of {})",
            entry.id, entry.quantity, entry.price, entry.asset
        );
        Ok(entry)
    }

    fn update(&mut self, id: usize, update: LedgerEntryUpdate) -> Result<LedgerEntry> {
        let index = self.index_of(id)?;
        update.validate()?;
        if update.is_empty() {
            return Ok(self.entries[index].clone());
        }

        let previous = self.entries[index].clone();
        self.entries[index].apply(&update)?;

        if let Err(e) = self.persist() {
            warn!("Update of entry {} not persisted, rolling back: {}", id, e);
            self.entries[index] = previous;
            return Err(e);
        }

        self.version += 1;
        let updated = self.entries[index].clone();
        info!(
            "Updated ledger entry {} (value {} -> {})",
            id, previous.value, updated.value
        );
        Ok(updated)
    }

    fn remove(&mut self, id: usize) -> Result<LedgerEntry> {
        let index = self.index_of(id)?;
        let removed = self.entries.remove(index);
        reindex(&mut self.entries);

        if let Err(e) = self.persist() {
            warn!("Removal of entry {} not persisted, rolling back: {}", id, e);
            self.entries.insert(index, removed);
            reindex(&mut self.entries);
            return Err(e);
        }

        self.version += 1;
        info!("Removed ledger entry {} ({})", id, removed.asset);
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        self.repository.save(&self.entries)
    }

    fn version(&self) -> u64 {
        self.version
    }
}
