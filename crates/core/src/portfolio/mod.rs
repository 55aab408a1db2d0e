//! Portfolio module - holdings, allocation and performance analytics.

pub mod allocation;
pub mod holdings;
pub mod performance;

pub use allocation::*;
pub use holdings::*;
pub use performance::*;
