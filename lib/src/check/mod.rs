//! Randomized differential checking of [`IntervalMap`](crate::map::IntervalMap) against a dense model.

mod fuzz;
mod model;

pub use fuzz::*;
pub use model::*;
