//! Error types for the xlsx2env library.
//!
//! Every variant of [`EnvelopeError`] is fatal: the run aborts and no
//! partial document is produced. Recoverable conditions (duplicate column
//! letters, skipped rows) are logged, not raised.
//!
//! Variants carry enough context (paths, indices, conf line numbers) for the
//! CLI to print an actionable diagnostic without re-deriving state.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the xlsx2env library.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    // ── Source errors ─────────────────────────────────────────────────────
    /// The workbook could not be opened (missing, unreadable, or not a
    /// zip-container spreadsheet).
    #[error("Cannot open spreadsheet '{path}': {reason}\nCheck the path exists and is an .xlsx/.xlsm workbook.")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// The selected sheet index does not exist in the workbook.
    #[error("Sheet {sheet} is out of range (workbook has {total} sheets)\nSheet numbers in the conf file are 1-based.")]
    SheetOutOfRange { sheet: usize, total: usize },

    // ── Configuration errors ──────────────────────────────────────────────
    /// The conf file could not be opened.
    #[error("Configuration file '{path}' could not be read: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A conf-file line has the wrong arity or a non-numeric value where a
    /// number was expected.
    #[error("Configuration file is invalid at line {line}: {detail}")]
    ConfigMalformed { line: usize, detail: String },

    /// Structural validation of the assembled configuration failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output .tex file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external LaTeX compiler could not be run or exited with failure.
    #[error("LaTeX compiler '{command}' failed: {detail}\nThe .tex file was written; you can compile it manually.")]
    CompilerFailed { command: String, detail: String },
}
