//! CSV tokenizing into a [`ParsedTable`].

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use intake_model::{CsvRow, ParsedTable};

use crate::error::{IngestError, Result};

use super::text::decode_text;

/// Decodes raw upload bytes into headers and keyed rows.
///
/// The first non-blank line is the header row. Every later non-blank line
/// becomes a [`CsvRow`]; cells past the end of a short line are absent and
/// cells past the last header are dropped. Zero headers or zero rows are
/// not errors here, see [`ensure_shape`].
pub fn decode_csv(bytes: &[u8]) -> Result<ParsedTable> {
    let text = decode_text(bytes)?;
    let mut records = read_records(text);

    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => {
            return Ok(ParsedTable {
                headers: Vec::new(),
                rows: Vec::new(),
                raw_text: text.to_string(),
            });
        }
    };

    let mut rows = Vec::new();
    let mut dropped_cells = 0usize;
    for record in records {
        let record = record?;
        if record.len() > headers.len() {
            dropped_cells += record.len() - headers.len();
        }
        let row: CsvRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.as_str(), value))
            .collect();
        rows.push(row);
    }
    if dropped_cells > 0 {
        debug!(dropped_cells, "dropped cells beyond the header row");
    }
    debug!(
        header_count = headers.len(),
        row_count = rows.len(),
        "decoded csv"
    );

    Ok(ParsedTable {
        headers,
        rows,
        raw_text: text.to_string(),
    })
}

/// Reads only the header row of CSV text.
pub fn read_csv_headers(text: &str) -> Result<Vec<String>> {
    match read_records(text).next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

/// Rejects tables with no header row or no data rows.
pub fn ensure_shape(table: &ParsedTable) -> Result<()> {
    if !table.has_headers() {
        return Err(IngestError::NoHeaders);
    }
    if !table.has_rows() {
        return Err(IngestError::NoDataRows);
    }
    Ok(())
}

/// Non-blank records of `text`. Tokenizer errors become [`IngestError::Decode`].
fn read_records(text: &str) -> impl Iterator<Item = Result<StringRecord>> + '_ {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
        .into_records()
        .map(|record| {
            record.map_err(|e| IngestError::Decode {
                reason: e.to_string(),
            })
        })
        .filter(|record| !matches!(record, Ok(r) if is_blank(r)))
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_headers_and_rows() {
        let table = decode_csv(b"email,title\na@x.io,CTO\nb@x.io,CEO\n").unwrap();
        assert_eq!(table.headers, vec!["email", "title"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("title"), Some("CEO"));
        assert_eq!(table.raw_text, "email,title\na@x.io,CTO\nb@x.io,CEO\n");
    }

    #[test]
    fn test_skips_blank_lines() {
        let table = decode_csv(b"\n\nemail,title\n\na@x.io,CTO\n\n").unwrap();
        assert_eq!(table.headers, vec!["email", "title"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_delimiter_only_line_is_a_row() {
        let table = decode_csv(b"a,b,c\n,,\n").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("b"), Some(""));
    }

    #[test]
    fn test_headers_are_not_trimmed() {
        let table = decode_csv(b"email , First Name\nx,y\n").unwrap();
        assert_eq!(table.headers, vec!["email ", " First Name"]);
    }

    #[test]
    fn test_short_row_leaves_cells_absent() {
        let table = decode_csv(b"a,b,c\n1\n").unwrap();
        let row = &table.rows[0];
        assert_eq!(row.get("a"), Some("1"));
        assert_eq!(row.get("b"), None);
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_long_row_drops_extra_cells() {
        let table = decode_csv(b"a,b\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_quoted_fields() {
        let table =
            decode_csv(b"company name,title\n\"Acme, Inc.\",\"VP \"\"Sales\"\"\"\n").unwrap();
        assert_eq!(table.rows[0].get("company name"), Some("Acme, Inc."));
        assert_eq!(table.rows[0].get("title"), Some("VP \"Sales\""));
    }

    #[test]
    fn test_duplicate_headers_preserved() {
        let table = decode_csv(b"email,email\na,b\n").unwrap();
        assert_eq!(table.headers, vec!["email", "email"]);
        assert_eq!(table.rows[0].get("email"), Some("b"));
    }

    #[test]
    fn test_only_blank_lines_yields_no_headers() {
        let table = decode_csv(b"\n\r\n\n").unwrap();
        assert!(table.headers.is_empty());
        assert!(matches!(ensure_shape(&table), Err(IngestError::NoHeaders)));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let table = decode_csv(b"email,title\n").unwrap();
        assert!(matches!(ensure_shape(&table), Err(IngestError::NoDataRows)));
    }

    #[test]
    fn test_read_csv_headers_preview() {
        let headers = read_csv_headers("\nemail,title\nx,y\n").unwrap();
        assert_eq!(headers, vec!["email", "title"]);
        assert!(read_csv_headers("").unwrap().is_empty());
    }
}
