//! Pipeline stages for spreadsheet-to-LaTeX envelope generation.
//!
//! Each submodule implements exactly one transformation step, so every
//! stage is independently testable and a stage can be swapped (say, a
//! different tabular backend) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! source ──▶ columns ──▶ extract ──▶ sanitize ──▶ synthesize
//! (workbook)  (letters    (rows to    (LaTeX-safe  (document
//!              to indices) records)    text)        text)
//! ```

pub mod columns;
pub mod extract;
pub mod sanitize;
pub mod source;
pub mod synthesize;
