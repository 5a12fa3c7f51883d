//! Core data structures for monthly series.

mod series;

pub use series::{month_end, MonthlySeries};
