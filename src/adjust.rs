//! Public adjustment entry point with fail-soft passthrough.

use crate::condition::condition;
use crate::config::X13Config;
use crate::core::MonthlySeries;
use crate::engine::{parse_d11, run_engine, write_request};
use crate::error::Result;

/// Seasonally adjust an NSA monthly series using X-13ARIMA-SEATS.
///
/// Conditions the input into a contiguous monthly window, writes a
/// temporary .dat + .spc pair, runs the engine, parses the d11
/// (seasonally adjusted) output, and maps adjusted values back onto the
/// original index. Dates outside the processed window keep their original
/// values.
///
/// This call is total: on any failure (missing binary, engine timeout, no
/// output, unparseable output) the failure is logged with `series_id` and
/// the original series is returned unchanged. The result never has fewer
/// entries than the input.
pub fn seasonal_adjust(
    series: &MonthlySeries,
    series_id: &str,
    config: &X13Config,
) -> MonthlySeries {
    let Some(window) = condition(series, series_id, config) else {
        return series.clone();
    };

    match adjust_window(&window, series_id, config) {
        Ok(adjusted) => merge(series, &adjusted),
        Err(err) => {
            log::warn!("X-13 failed for {series_id}: {err}; using unadjusted");
            series.clone()
        }
    }
}

/// Encode, invoke, and parse inside one scoped scratch directory.
///
/// The `TempDir` guard removes the directory and everything in it on every
/// exit path, including engine failure and timeout.
fn adjust_window(
    window: &MonthlySeries,
    series_id: &str,
    config: &X13Config,
) -> Result<MonthlySeries> {
    let scratch = tempfile::Builder::new().prefix("x13_").tempdir()?;
    let request = write_request(scratch.path(), window, config)?;
    let d11 = run_engine(&request, series_id, config)?;
    parse_d11(&d11)
}

/// Copy the original series and overwrite entries covered by the adjusted
/// window. Adjusted dates absent from the original are not inserted.
fn merge(original: &MonthlySeries, adjusted: &MonthlySeries) -> MonthlySeries {
    let mut result = original.clone();
    for (date, value) in adjusted.iter() {
        result.overwrite(date, value);
    }
    result
}
