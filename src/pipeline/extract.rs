//! Record extraction: walk a bounded row range and pull the address fields.
//!
//! Extraction does no sanitisation and keeps the source row order. The only
//! judgement call it makes is the skip sentinel: a `"?"` in the street
//! column marks a guest whose address is intentionally blank in the source
//! list, and such rows produce no record at all.

use crate::error::EnvelopeError;
use crate::pipeline::columns::ColumnIndices;
use crate::pipeline::source::TabularReader;
use tracing::debug;

/// Street value marking a row as intentionally incomplete.
pub const SKIP_SENTINEL: &str = "?";

/// One guest's address, verbatim from the spreadsheet.
///
/// Created per row, consumed immediately by the synthesizer, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub name: String,
    pub street: String,
    pub city: String,
    pub country: String,
}

/// What one extraction pass produced.
#[derive(Debug)]
pub struct Extraction {
    /// Records in source row order.
    pub records: Vec<AddressRecord>,
    /// Rows visited, including skipped ones.
    pub rows_scanned: usize,
    /// Rows excluded by the skip sentinel.
    pub skipped: usize,
}

/// Read rows `rows.0..=rows.1` (1-based, inclusive) from sheet
/// `sheet_index` (0-based) of `reader`.
///
/// Cells beyond a ragged row's width read as empty strings rather than
/// aborting the run.
pub fn extract(
    reader: &mut dyn TabularReader,
    sheet_index: usize,
    rows: (usize, usize),
    columns: &ColumnIndices,
) -> Result<Extraction, EnvelopeError> {
    reader.select_sheet(sheet_index)?;

    let (start, end) = rows;
    let mut records = Vec::with_capacity(end - start + 1);
    let mut skipped = 0usize;

    for row_index in (start - 1)..end {
        let values = reader.row(row_index);
        let field = |i: usize| values.get(i).cloned().unwrap_or_default();

        if field(columns.street) == SKIP_SENTINEL {
            debug!("Row {} skipped (street sentinel)", row_index + 1);
            skipped += 1;
            continue;
        }

        records.push(AddressRecord {
            name: field(columns.name),
            street: field(columns.street),
            city: field(columns.city),
            country: field(columns.country),
        });
    }

    debug!(
        "Extracted {} records from {} rows ({} skipped)",
        records.len(),
        end - start + 1,
        skipped
    );

    Ok(Extraction {
        records,
        rows_scanned: end - start + 1,
        skipped,
    })
}
