//! # xlsx2env
//!
//! Typeset mailing envelopes from a spreadsheet guest list.
//!
//! Guest lists live in spreadsheets; envelopes are printed from LaTeX. This
//! crate bridges the two: it reads a configured range of rows from a
//! workbook, sanitises the free-text address fields into LaTeX-safe markup
//! (escaping reserved characters, superscripting street ordinals like
//! `21st`), and assembles a one-envelope-per-page document sized to the
//! physical envelope.
//!
//! ## Pipeline Overview
//!
//! ```text
//! guests.xlsx
//!  │
//!  ├─ 1. Source    open the workbook, select the sheet (calamine)
//!  ├─ 2. Columns   resolve configured column letters to indices
//!  ├─ 3. Extract   walk the row range, skip "?" placeholder rows
//!  ├─ 4. Sanitize  escape #/& and superscript ordinal suffixes
//!  └─ 5. Synthesize  preamble + one page per guest + closing
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xlsx2env::{generate, EnvelopeConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EnvelopeConfig::builder()
//!         .source("guests.xlsx")
//!         .sheet(2)
//!         .rows(5, 129)
//!         .columns('B', 'E', 'F', 'G')
//!         .build()?;
//!     let output = generate(&config)?;
//!     println!("{}", output.document.text());
//!     eprintln!("{} envelopes ({} rows skipped)",
//!         output.stats.envelopes, output.stats.skipped);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `xlsx2env` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! xlsx2env = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod testdata;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ColumnLabels, ConfigOverrides, EnvelopeConfig, EnvelopeConfigBuilder, PageDimensions, RowRange,
};
pub use convert::{compile_pdf, generate, generate_to_file, generate_with_reader, write_document};
pub use error::EnvelopeError;
pub use output::{Document, EnvelopeOutput, GenerationStats};
pub use pipeline::extract::AddressRecord;
pub use pipeline::source::{MemoryReader, TabularReader, XlsxReader};
