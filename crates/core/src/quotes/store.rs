//! Price history storage trait.

use super::model::PriceObservation;
use crate::errors::Result;

/// Read-only source of price observations.
pub trait PriceHistoryRepositoryTrait: Send + Sync {
    /// Returns every stored observation, or an empty vector when no history
    /// exists yet.
    fn load_observations(&self) -> Result<Vec<PriceObservation>>;
}
