//! Input conditioning: sort, deduplicate, trim, and gap-fill a raw series
//! into the contiguous monthly window the engine requires.

use chrono::{Days, Months, NaiveDate};

use crate::config::X13Config;
use crate::core::{month_end, MonthlySeries};

/// Condition a raw series for the engine.
///
/// Returns `None` when the series is too short to adjust, before or after
/// trimming to the configured span. This stage never fails: the outcome is
/// either a sorted, deduplicated, gap-free window or a skip.
pub fn condition(
    series: &MonthlySeries,
    series_id: &str,
    config: &X13Config,
) -> Option<MonthlySeries> {
    if series.len() < config.min_observations {
        log::debug!(
            "X-13: too few observations ({}) for {series_id}, skipping",
            series.len()
        );
        return None;
    }

    let cleaned = series.sorted_deduped();

    // Use the most recent N years only.
    let last = cleaned.last_date()?;
    let cutoff = last.checked_sub_months(Months::new(config.span_years * 12))?;
    let trimmed = MonthlySeries::from_pairs(cleaned.iter().filter(|(d, _)| *d >= cutoff));

    if trimmed.len() < config.min_observations {
        log::debug!(
            "X-13: too few observations after {}yr trim ({}) for {series_id}",
            config.span_years,
            trimmed.len()
        );
        return None;
    }

    // The engine requires contiguous monthly data; fill gaps by linear
    // interpolation between the nearest known neighbors.
    let first = trimmed.first_date()?;
    let last = trimmed.last_date()?;
    let expected = month_sequence(first, last);
    if expected.len() == trimmed.len() {
        return Some(trimmed);
    }

    let n_gaps = expected.len() - trimmed.len();
    let mut values: Vec<f64> = expected
        .iter()
        .map(|d| trimmed.get(*d).unwrap_or(f64::NAN))
        .collect();
    interpolate_gaps(&mut values);
    log::debug!("X-13: interpolated {n_gaps} missing months for {series_id}");

    Some(MonthlySeries::from_pairs(
        expected.into_iter().zip(values),
    ))
}

/// Full month-end calendar sequence spanning [first, last].
fn month_sequence(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let last = month_end(last);
    let mut months = Vec::new();
    let mut current = month_end(first);
    while current <= last {
        months.push(current);
        current = match current.checked_add_days(Days::new(1)) {
            Some(next) => month_end(next),
            None => break,
        };
    }
    months
}

/// Linearly interpolate interior NaN runs in place.
///
/// The window's first and last months are always real observations, so
/// every NaN run has known neighbors on both sides and no extrapolation
/// happens at the boundaries.
fn interpolate_gaps(values: &mut [f64]) {
    let n = values.len();
    let mut i = 0;
    while i < n {
        if values[i].is_nan() {
            let start = i;
            while i < n && values[i].is_nan() {
                i += 1;
            }
            let end = i;
            if start == 0 || end == n {
                continue;
            }
            let left = values[start - 1];
            let right = values[end];
            let segments = (end - start + 1) as f64;
            for (j, idx) in (start..end).enumerate() {
                let t = (j + 1) as f64 / segments;
                values[idx] = left + t * (right - left);
            }
        } else {
            i += 1;
        }
    }
}
