//! Portfolio allocation module for composition breakdowns.

mod allocation_calculator;
mod allocation_model;

pub use allocation_calculator::*;
pub use allocation_model::*;
