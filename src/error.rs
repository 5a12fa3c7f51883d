//! Error types for the x13-seasonal library.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for adjustment operations.
pub type Result<T> = std::result::Result<T, X13Error>;

/// Errors that can occur while driving the X-13 engine.
///
/// Too few observations is deliberately not represented here: it is a skip
/// signal handled during conditioning, not a failure.
#[derive(Error, Debug)]
pub enum X13Error {
    /// The configured engine binary does not exist.
    #[error("X-13 binary not found at {0}")]
    BinaryNotFound(PathBuf),

    /// The engine did not finish within the configured wall-clock budget.
    #[error("X-13 timed out after {timeout:?}")]
    EngineTimeout { timeout: Duration },

    /// The engine exited (or was killed) without writing the d11 artifact.
    #[error("X-13 did not produce d11 output. stderr: {stderr}")]
    EngineProducedNoOutput { stderr: String },

    /// The d11 artifact contained zero recognizable data lines.
    #[error("no data parsed from d11 file: {0}")]
    NoDataParsed(PathBuf),

    /// Filesystem or subprocess I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
