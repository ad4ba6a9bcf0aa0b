//! Decoded CSV upload.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One data row keyed by header.
///
/// Cells are kept in header order. A header with no cell in this row (a
/// short, ragged line) is absent rather than empty, and serializes as a
/// missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    cells: Vec<(String, String)>,
}

impl CsvRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `header`.
    ///
    /// A repeated header keeps its first position and takes the new value.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(key, _)| *key == header) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((header, value)),
        }
    }

    /// Value for `header`, `None` when the row has no such cell.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for CsvRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = CsvRow::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for CsvRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A successfully decoded CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Header row as it appeared in the file. Duplicates are kept.
    pub headers: Vec<String>,
    /// Data rows, blank lines excluded.
    pub rows: Vec<CsvRow>,
    /// Decoded file content.
    pub raw_text: String,
}

impl ParsedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}
