//! Column mapping: single-letter labels to 0-based field indices.
//!
//! Guest lists are configured with the column letters shown in the
//! spreadsheet UI (`B`, `E`, …). Internally every lookup is a 0-based index
//! into a row, so the four semantic labels are resolved once, up front.
//! Only columns `A`–`Z` are supported.

use crate::config::ColumnLabels;
use tracing::warn;

/// Resolved 0-based column indices for the four address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub name: usize,
    pub street: usize,
    pub city: usize,
    pub country: usize,
}

impl ColumnIndices {
    /// Resolve the configured column letters.
    ///
    /// Letters are case-insensitive. Duplicate letters are accepted (two
    /// fields then read the same underlying column) but are almost certainly
    /// a configuration mistake, so a warning is logged.
    pub fn from_labels(labels: &ColumnLabels) -> Self {
        let indices = Self {
            name: letter_index(labels.name),
            street: letter_index(labels.street),
            city: letter_index(labels.city),
            country: letter_index(labels.country),
        };
        let mut seen = [indices.name, indices.street, indices.city, indices.country];
        seen.sort_unstable();
        if seen.windows(2).any(|w| w[0] == w[1]) {
            warn!(
                "duplicate column letters {:?}: two address fields will read the same column",
                labels
            );
        }
        indices
    }
}

/// `'A'`/`'a'` → 0 … `'Z'`/`'z'` → 25.
///
/// Callers validate the label is alphabetic before this point
/// (see [`crate::config::EnvelopeConfigBuilder::build`]).
fn letter_index(letter: char) -> usize {
    (letter.to_ascii_uppercase() as u8 - b'A') as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(name: char, street: char, city: char, country: char) -> ColumnLabels {
        ColumnLabels {
            name,
            street,
            city,
            country,
        }
    }

    #[test]
    fn test_abcd_maps_to_0123() {
        let idx = ColumnIndices::from_labels(&labels('A', 'B', 'C', 'D'));
        assert_eq!((idx.name, idx.street, idx.city, idx.country), (0, 1, 2, 3));
    }

    #[test]
    fn test_befg_maps_to_1456() {
        let idx = ColumnIndices::from_labels(&labels('B', 'E', 'F', 'G'));
        assert_eq!((idx.name, idx.street, idx.city, idx.country), (1, 4, 5, 6));
    }

    #[test]
    fn test_lowercase_letters() {
        let idx = ColumnIndices::from_labels(&labels('b', 'e', 'f', 'g'));
        assert_eq!((idx.name, idx.street, idx.city, idx.country), (1, 4, 5, 6));
    }

    #[test]
    fn test_duplicate_letters_accepted() {
        // Not rejected; both fields read column 0.
        let idx = ColumnIndices::from_labels(&labels('A', 'A', 'C', 'D'));
        assert_eq!(idx.name, idx.street);
    }
}
