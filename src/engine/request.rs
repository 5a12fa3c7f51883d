//! Encoding of the engine's on-disk request: data feed and spec block.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;

use crate::config::X13Config;
use crate::core::MonthlySeries;
use crate::error::Result;

/// The pair of request artifacts, addressed by an extension-less base path.
///
/// The engine derives every file name from this base: it reads
/// `<base>.dat` and `<base>.spc` and writes `<base>.d11`.
#[derive(Debug)]
pub struct EngineRequest {
    base: PathBuf,
}

impl EngineRequest {
    /// Extension-less base path the engine is invoked with.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Scratch directory the engine runs in.
    pub fn dir(&self) -> &Path {
        self.base.parent().unwrap_or(Path::new("."))
    }

    /// Path of the free-format data feed.
    pub fn dat_path(&self) -> PathBuf {
        self.base.with_extension("dat")
    }

    /// Path of the spec block.
    pub fn spc_path(&self) -> PathBuf {
        self.base.with_extension("spc")
    }

    /// Path where the engine writes the seasonally adjusted table.
    pub fn d11_path(&self) -> PathBuf {
        self.base.with_extension("d11")
    }
}

/// Write the `.dat` value feed and `.spc` spec block into `dir`.
///
/// The data feed is order-dependent and unlabeled: dates are implied by
/// the spec block's start value and period. Does not invoke the engine.
/// The window must be non-empty and chronological, as produced by
/// conditioning.
pub fn write_request(
    dir: &Path,
    window: &MonthlySeries,
    config: &X13Config,
) -> Result<EngineRequest> {
    debug_assert!(!window.is_empty());
    let request = EngineRequest {
        base: dir.join("input"),
    };

    let mut dat = String::new();
    for value in window.values() {
        dat.push_str(&format!("  {value:.6}\n"));
    }
    fs::write(request.dat_path(), dat)?;

    let start = window
        .first_date()
        .map(|d| format!("{}.{}", d.year(), d.month()))
        .unwrap_or_default();
    let interventions = config.interventions.as_deref().unwrap_or("");
    let spc = format!(
        "series{{\n  file = \"{dat}\"\n  period = 12\n  start = {start}\n}}\n\
         transform{{\n  function = {transform}\n}}\n\
         automdl{{}}\n\
         {interventions}\
         x11{{\n  save = (d11)\n}}\n",
        dat = request.dat_path().display(),
        transform = config.transform.as_spec(),
    );
    fs::write(request.spc_path(), spc)?;

    Ok(request)
}
