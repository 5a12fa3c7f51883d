//! Monthly series container keyed by month-end dates.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::collections::BTreeMap;

/// Normalize a date to the last day of its calendar month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

/// A dated monthly series stored as parallel date/value vectors.
///
/// Every date is normalized to the last calendar day of its month on
/// insertion, so equality-based lookups cannot miss entries stamped
/// mid-month by the caller. Input series may be unsorted, contain
/// duplicate months, or carry non-finite values; conditioning handles
/// those before the engine ever sees the data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl MonthlySeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from (date, value) pairs, preserving insertion order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut series = Self::new();
        for (date, value) in pairs {
            series.push(date, value);
        }
        series
    }

    /// Append an observation. The date is normalized to month end.
    pub fn push(&mut self, date: NaiveDate, value: f64) {
        self.dates.push(month_end(date));
        self.values.push(value);
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates, in insertion order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observation values, in insertion order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over (date, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Look up the value at a date (normalized to month end).
    ///
    /// When the series still carries duplicate months, the last-inserted
    /// value wins, matching the deduplication policy.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        let key = month_end(date);
        self.dates
            .iter()
            .rposition(|d| *d == key)
            .map(|i| self.values[i])
    }

    /// Earliest observation date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.iter().min().copied()
    }

    /// Latest observation date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.iter().max().copied()
    }

    /// Overwrite every entry at the given month with a new value.
    ///
    /// Dates absent from the series are ignored; nothing is inserted.
    pub fn overwrite(&mut self, date: NaiveDate, value: f64) {
        let key = month_end(date);
        for (d, v) in self.dates.iter().zip(self.values.iter_mut()) {
            if *d == key {
                *v = value;
            }
        }
    }

    /// Return a copy sorted ascending, with non-finite values dropped and
    /// duplicate months collapsed to the last-inserted value.
    pub fn sorted_deduped(&self) -> MonthlySeries {
        let mut map = BTreeMap::new();
        for (date, value) in self.iter() {
            if value.is_finite() {
                map.insert(date, value);
            }
        }
        let mut series = MonthlySeries::new();
        for (date, value) in map {
            series.push(date, value);
        }
        series
    }
}
