//! Configuration for the X-13ARIMA-SEATS seasonal adjustment wrapper.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Fallback engine location when `X13AS_PATH` is not set.
const DEFAULT_BINARY_PATH: &str = "/usr/local/bin/x13as";

/// Default intervention regression block covering the COVID shock.
const DEFAULT_INTERVENTIONS: &str =
    "regression{\n  variables = (Rp2020.03-2020.05 LS2020.06)\n}\n";

/// Transform function applied by the engine before decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// Let the engine choose between log and no transform.
    #[default]
    Auto,
    /// Log transform.
    Log,
    /// No transform.
    None,
}

impl Transform {
    /// Keyword understood by the engine's `transform` spec.
    pub fn as_spec(&self) -> &'static str {
        match self {
            Transform::Auto => "auto",
            Transform::Log => "log",
            Transform::None => "none",
        }
    }
}

impl FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Transform::Auto),
            "log" => Ok(Transform::Log),
            "none" => Ok(Transform::None),
            other => Err(format!("unknown transform: {other}")),
        }
    }
}

/// Tuning parameters for a seasonal adjustment call.
///
/// Constructed once and passed by reference into every call; never mutated.
/// Callers needing different tuning build their own value rather than
/// relying on shared mutable state.
#[derive(Debug, Clone)]
pub struct X13Config {
    /// Path to the x13as binary.
    /// Defaults to `$X13AS_PATH` or `/usr/local/bin/x13as`.
    pub binary_path: PathBuf,
    /// Number of recent years of data to feed the engine.
    pub span_years: u32,
    /// Minimum observations required to attempt adjustment.
    pub min_observations: usize,
    /// Regression spec block for interventions (e.g. COVID).
    /// `None` disables interventions entirely.
    pub interventions: Option<String>,
    /// Wall-clock budget for the engine subprocess.
    pub timeout: Duration,
    /// Transform function.
    pub transform: Transform,
}

impl Default for X13Config {
    fn default() -> Self {
        Self {
            binary_path: env::var("X13AS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_BINARY_PATH)),
            span_years: 8,
            min_observations: 36,
            interventions: Some(DEFAULT_INTERVENTIONS.to_string()),
            timeout: Duration::from_secs(60),
            transform: Transform::Auto,
        }
    }
}
