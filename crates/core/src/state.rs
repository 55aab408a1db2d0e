//! Application state shared by the presentation layer.
//!
//! `PortfolioState` owns the ledger and a holdings snapshot tagged with the
//! ledger version it was computed from. Mutations invalidate the snapshot;
//! recomputation is always an explicit call.

use log::debug;

use crate::ledger::{
    LedgerEntry, LedgerEntryUpdate, LedgerService, LedgerServiceTrait, NewLedgerEntry,
};
use crate::portfolio::holdings::{aggregate_with, AveragePriceMethod, Holding};
use crate::Result;

struct HoldingsCache {
    version: u64,
    holdings: Vec<Holding>,
}

pub struct PortfolioState {
    ledger: LedgerService,
    avg_price_method: AveragePriceMethod,
    cache: Option<HoldingsCache>,
}

impl PortfolioState {
    pub fn new(ledger: LedgerService, avg_price_method: AveragePriceMethod) -> Self {
        Self {
            ledger,
            avg_price_method,
            cache: None,
        }
    }

    pub fn ledger(&self) -> &LedgerService {
        &self.ledger
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        self.ledger.entries()
    }

    pub fn avg_price_method(&self) -> AveragePriceMethod {
        self.avg_price_method
    }

    /// Changes the averaging method and drops the snapshot.
    pub fn set_avg_price_method(&mut self, method: AveragePriceMethod) {
        if self.avg_price_method != method {
            self.avg_price_method = method;
            self.invalidate();
        }
    }

    pub fn add_entry(&mut self, new_entry: NewLedgerEntry) -> Result<LedgerEntry> {
        let entry = self.ledger.append(new_entry)?;
        self.invalidate();
        Ok(entry)
    }

    pub fn update_entry(&mut self, id: usize, update: LedgerEntryUpdate) -> Result<LedgerEntry> {
        let entry = self.ledger.update(id, update)?;
        self.invalidate();
        Ok(entry)
    }

    pub fn remove_entry(&mut self, id: usize) -> Result<LedgerEntry> {
        let entry = self.ledger.remove(id)?;
        self.invalidate();
        Ok(entry)
    }

    /// Rereads the ledger from storage.
    pub fn reload(&mut self) -> Result<()> {
        self.ledger.reload()?;
        self.invalidate();
        Ok(())
    }

    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            debug!("Holdings snapshot invalidated");
        }
    }

    /// Cached holdings, or `None` when the snapshot is missing or older than
    /// the ledger. Never recomputes.
    pub fn holdings(&self) -> Option<&[Holding]> {
        self.cache
            .as_ref()
            .filter(|c| c.version == self.ledger.version())
            .map(|c| c.holdings.as_slice())
    }

    /// Rebuilds the holdings snapshot from the current ledger.
    pub fn recompute(&mut self) -> &[Holding] {
        let version = self.ledger.version();
        let holdings = aggregate_with(self.ledger.entries(), self.avg_price_method);
        debug!(
            "Recomputed {} holdings at ledger version {}",
            holdings.len(),
            version
        );
        let cache = self.cache.insert(HoldingsCache { version, holdings });
        &cache.holdings
    }
}
