//! # x13-seasonal
//!
//! X-13ARIMA-SEATS seasonal adjustment wrapper.
//!
//! Prepares a raw, not-seasonally-adjusted monthly series for the X-13
//! binary, invokes it as a subprocess with a bounded wall clock, parses
//! the d11 (seasonally adjusted) output, and maps adjusted values back
//! onto the caller's index.
//!
//! The entry point is [`seasonal_adjust`]. Its contract is total: any
//! failure along the way (too little data, missing binary, engine timeout
//! or crash, unparseable output) degrades to returning the original series
//! unchanged, so callers never receive fewer data points than they passed
//! in.

pub mod adjust;
pub mod condition;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;

pub use adjust::seasonal_adjust;
pub use config::{Transform, X13Config};
pub use crate::core::{month_end, MonthlySeries};
pub use error::{Result, X13Error};

pub mod prelude {
    pub use crate::adjust::seasonal_adjust;
    pub use crate::config::{Transform, X13Config};
    pub use crate::core::{month_end, MonthlySeries};
    pub use crate::error::{Result, X13Error};
}
