//! CLI error type.

use std::io;
use thiserror::Error;
use unireg_core::CoreError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from the records core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Terminal or file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON output could not be produced.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard input was closed while a prompt was waiting.
    #[error("end of input")]
    EndOfInput,

    /// The user pressed Ctrl-C while a prompt was waiting.
    #[error("interrupted by user")]
    Interrupted,

    /// The Ctrl-C handler could not be installed.
    #[error("signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),

    /// The integrity check found problems.
    #[error("verification failed: {0} issue(s) found")]
    IntegrityIssues(usize),

    /// Saved data exists but could not be decoded.
    #[error("saved data could not be decoded: {0}")]
    CorruptData(String),
}
