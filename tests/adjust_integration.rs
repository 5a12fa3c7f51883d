//! End-to-end tests for the adjustment pipeline.
//!
//! The engine is stood in for by small shell scripts, so these tests
//! exercise the real subprocess, scratch-directory, and parsing paths
//! without an x13as installation.

use chrono::{Days, NaiveDate};
use std::path::PathBuf;
use std::time::Duration;
use x13_seasonal::{month_end, seasonal_adjust, MonthlySeries, X13Config};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// n consecutive months starting at the given month end.
fn monthly_series(start: NaiveDate, n: usize) -> MonthlySeries {
    let mut s = MonthlySeries::new();
    let mut date = month_end(start);
    for i in 0..n {
        s.push(date, 100.0 + i as f64);
        date = month_end(date + Days::new(1));
    }
    s
}

#[cfg(unix)]
fn fake_engine(dir: &std::path::Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("x13as");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn twelve_observations_with_default_minimum_pass_through() {
    let cfg = X13Config::default();
    let series = monthly_series(ymd(2023, 1, 31), 12);

    let result = seasonal_adjust(&series, "too-short", &cfg);

    assert_eq!(result, series);
}

#[test]
fn missing_binary_passes_ninety_six_observations_through() {
    let cfg = X13Config {
        binary_path: PathBuf::from("/nonexistent/x13as"),
        ..X13Config::default()
    };
    let series = monthly_series(ymd(2015, 1, 31), 96);

    let result = seasonal_adjust(&series, "no-binary", &cfg);

    assert_eq!(result.dates(), series.dates());
    assert_eq!(result.values(), series.values());
}

#[cfg(unix)]
#[test]
fn successful_engine_run_overwrites_covered_months_only() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_engine(
        dir.path(),
        "printf '  seasonally adjusted\\n------\\n202001  1.110000E+02\\n202002  112.5\\n' > \"$1.d11\"",
    );
    let cfg = X13Config {
        binary_path: binary,
        ..X13Config::default()
    };
    let series = monthly_series(ymd(2020, 1, 31), 48);

    let result = seasonal_adjust(&series, "success", &cfg);

    assert_eq!(result.len(), series.len());
    assert_eq!(result.get(ymd(2020, 1, 31)), Some(111.0));
    assert_eq!(result.get(ymd(2020, 2, 29)), Some(112.5));
    // Months the d11 did not cover keep their original values.
    assert_eq!(result.get(ymd(2020, 3, 31)), series.get(ymd(2020, 3, 31)));
    assert_eq!(result.get(ymd(2023, 12, 31)), series.get(ymd(2023, 12, 31)));
}

#[cfg(unix)]
#[test]
fn engine_without_output_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_engine(dir.path(), "echo 'ERROR: model' >&2; exit 1");
    let cfg = X13Config {
        binary_path: binary,
        ..X13Config::default()
    };
    let series = monthly_series(ymd(2020, 1, 31), 48);

    let result = seasonal_adjust(&series, "engine-error", &cfg);

    assert_eq!(result, series);
}

#[cfg(unix)]
#[test]
fn unparseable_d11_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_engine(dir.path(), "printf 'header only\\n------\\n' > \"$1.d11\"");
    let cfg = X13Config {
        binary_path: binary,
        ..X13Config::default()
    };
    let series = monthly_series(ymd(2020, 1, 31), 48);

    let result = seasonal_adjust(&series, "bad-d11", &cfg);

    assert_eq!(result, series);
}

#[cfg(unix)]
#[test]
fn stderr_chatty_engine_still_adjusts_within_budget() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_engine(
        dir.path(),
        "head -c 200000 /dev/zero | tr '\\0' e >&2\n\
         echo '202001  111.0' > \"$1.d11\"",
    );
    let cfg = X13Config {
        binary_path: binary,
        timeout: Duration::from_secs(3),
        ..X13Config::default()
    };
    let series = monthly_series(ymd(2020, 1, 31), 48);

    let result = seasonal_adjust(&series, "chatty", &cfg);

    assert_eq!(result.get(ymd(2020, 1, 31)), Some(111.0));
    assert_eq!(result.get(ymd(2020, 2, 29)), series.get(ymd(2020, 2, 29)));
}

#[cfg(unix)]
#[test]
fn engine_timeout_passes_through() {
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_engine(dir.path(), "sleep 10");
    let cfg = X13Config {
        binary_path: binary,
        timeout: Duration::from_millis(100),
        ..X13Config::default()
    };
    let series = monthly_series(ymd(2020, 1, 31), 48);

    let result = seasonal_adjust(&series, "slow-engine", &cfg);

    assert_eq!(result, series);
}

#[cfg(unix)]
#[test]
fn gappy_input_is_interpolated_before_reaching_the_engine() {
    // The fake engine keeps a copy of the data feed next to itself so the
    // test can observe exactly what the engine was fed.
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_engine(
        dir.path(),
        "cp \"$1.dat\" \"$(dirname \"$0\")/seen.dat\"\n\
         echo '202001  111.0' > \"$1.d11\"",
    );
    let cfg = X13Config {
        binary_path: binary,
        min_observations: 10,
        ..X13Config::default()
    };

    // 2020-01 .. 2020-12 with June missing.
    let mut series = MonthlySeries::new();
    let mut date = ymd(2020, 1, 31);
    for i in 0..12 {
        if i != 5 {
            series.push(date, 100.0 + i as f64);
        }
        date = month_end(date + Days::new(1));
    }

    let result = seasonal_adjust(&series, "gap", &cfg);

    // The engine saw the full 12-month window with June filled by the
    // mean of its neighbors.
    let seen = std::fs::read_to_string(dir.path().join("seen.dat")).unwrap();
    let lines: Vec<&str> = seen.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[5], "  105.000000");

    // June was absent from the original index, so the interpolated value
    // is not re-inserted into the result.
    assert_eq!(result.len(), 11);
    assert_eq!(result.get(ymd(2020, 6, 30)), None);
    assert_eq!(result.get(ymd(2020, 1, 31)), Some(111.0));
    assert_eq!(result.get(ymd(2020, 7, 31)), Some(106.0));
}
