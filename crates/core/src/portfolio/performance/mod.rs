//! Performance module - period bucketing, yearly returns and growth series.

pub mod performance_model;
mod resampler;
mod returns_calculator;

#[cfg(test)]
mod performance_tests;

pub use performance_model::*;
pub use resampler::bucketed_cumulative;
pub use returns_calculator::*;
