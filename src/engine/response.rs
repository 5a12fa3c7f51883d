//! Parser for the engine's d11 (seasonally adjusted) output table.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::core::MonthlySeries;
use crate::error::{Result, X13Error};

/// Data lines look like `202301  123.456789` or `202301  1.234568E+02`.
static DATA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(\d{2})\s+([-+]?\d+\.?\d*(?:[eE][-+]?\d+)?)")
        .expect("d11 data-line pattern is valid")
});

/// Parse the d11 artifact into a month-end keyed series.
///
/// Header lines, blank lines, and dash separators are skipped. Lines
/// matching the `YYYYMM` prefix with a month outside 1..=12 are silently
/// discarded. Zero matched lines is an error: an empty or malformed
/// artifact must not become an empty success.
pub fn parse_d11(path: &Path) -> Result<MonthlySeries> {
    let text = fs::read_to_string(path)?;
    let mut series = MonthlySeries::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        let Some(caps) = DATA_LINE.captures(line) else {
            continue;
        };
        let (Ok(year), Ok(month), Ok(value)) = (
            caps[1].parse::<i32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<f64>(),
        ) else {
            continue;
        };
        let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
            continue;
        };
        series.push(first_of_month, value);
    }

    if series.is_empty() {
        return Err(X13Error::NoDataParsed(path.to_path_buf()));
    }
    Ok(series)
}
