//! Tabular sources: where address rows come from.
//!
//! The extractor only needs to select a sheet by 0-based index and read a
//! row as strings, so that is the whole [`TabularReader`] trait.
//! [`XlsxReader`] is the production
//! implementation backed by calamine; [`MemoryReader`] feeds the pipeline
//! from plain vectors, which keeps the end-to-end tests free of fixture
//! files.

use crate::error::EnvelopeError;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Row/column access to one spreadsheet-like source.
///
/// A reader is consumed by exactly one pipeline run: the sheet is selected
/// once, rows are read sequentially, and the source is released when the
/// reader is dropped.
pub trait TabularReader {
    /// Select the sheet to read rows from (0-based).
    fn select_sheet(&mut self, index: usize) -> Result<(), EnvelopeError>;

    /// Values of the 0-based `index` row of the selected sheet, leftmost
    /// column first. Rows past the end of the data are empty; so are rows
    /// read before any sheet was selected.
    fn row(&self, index: usize) -> Vec<String>;
}

// ── XlsxReader ───────────────────────────────────────────────────────────────

/// Calamine-backed workbook reader for `.xlsx`/`.xlsm` files.
pub struct XlsxReader {
    path: PathBuf,
    workbook: Xlsx<BufReader<std::fs::File>>,
    range: Option<Range<Data>>,
}

impl std::fmt::Debug for XlsxReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxReader")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl XlsxReader {
    /// Open a workbook from disk.
    ///
    /// Fails with [`EnvelopeError::SourceUnavailable`] when the file is
    /// missing, unreadable, or not a zip-container spreadsheet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EnvelopeError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(EnvelopeError::SourceUnavailable {
                path,
                reason: "file not found".into(),
            });
        }

        let workbook = open_workbook(&path).map_err(|e: calamine::XlsxError| {
            EnvelopeError::SourceUnavailable {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!("Opened workbook: {}", path.display());
        Ok(Self {
            path,
            workbook,
            range: None,
        })
    }

    /// Path this reader was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of sheets in the workbook.
    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_names().len()
    }
}

impl TabularReader for XlsxReader {
    fn select_sheet(&mut self, index: usize) -> Result<(), EnvelopeError> {
        let total = self.sheet_count();
        let range = self
            .workbook
            .worksheet_range_at(index)
            .ok_or(EnvelopeError::SheetOutOfRange {
                sheet: index,
                total,
            })?
            .map_err(|e| EnvelopeError::SourceUnavailable {
                path: self.path.clone(),
                reason: format!("sheet {index} could not be read: {e}"),
            })?;

        debug!("Selected sheet {index} of {total}");
        self.range = Some(range);
        Ok(())
    }

    fn row(&self, index: usize) -> Vec<String> {
        let Some(range) = &self.range else {
            return Vec::new();
        };
        let Some((_, end_col)) = range.end() else {
            return Vec::new();
        };
        (0..=end_col)
            .map(|col| {
                range
                    .get_value((index as u32, col))
                    .map(cell_text)
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Render one cell the way it reads in the spreadsheet UI.
///
/// House numbers are frequently stored as numeric cells; rendering `134.0`
/// on an envelope would be absurd, so integral floats lose the fraction.
fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

// ── MemoryReader ─────────────────────────────────────────────────────────────

/// In-memory source: a vector of sheets, each a vector of rows.
pub struct MemoryReader {
    sheets: Vec<Vec<Vec<String>>>,
    selected: Option<usize>,
}

impl MemoryReader {
    pub fn new(sheets: Vec<Vec<Vec<String>>>) -> Self {
        Self {
            sheets,
            selected: None,
        }
    }

    /// Convenience constructor for the common single-sheet case.
    pub fn single_sheet(rows: Vec<Vec<String>>) -> Self {
        Self::new(vec![rows])
    }
}

impl TabularReader for MemoryReader {
    fn select_sheet(&mut self, index: usize) -> Result<(), EnvelopeError> {
        if index >= self.sheets.len() {
            return Err(EnvelopeError::SheetOutOfRange {
                sheet: index,
                total: self.sheets.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    fn row(&self, index: usize) -> Vec<String> {
        self.selected
            .and_then(|s| self.sheets[s].get(index))
            .cloned()
            .unwrap_or_default()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
