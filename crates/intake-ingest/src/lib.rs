//! Lead intake ingestion.
//!
//! Turns a file the user picked into a [`ParsedTable`]:
//!
//! 1. **Upload gate** ([`check_upload`]): `.csv` name or `text/csv` type,
//!    non-empty, at most [`MAX_UPLOAD_BYTES`]
//! 2. **Decode** ([`decode_csv`]): UTF-8 text, first non-blank line as headers
//! 3. **Shape** ([`ensure_shape`]): at least one header and one data row
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use intake_ingest::{SelectedFile, load_upload};
//!
//! let file = SelectedFile::from_path(Path::new("leads.csv"), None)?;
//! let table = load_upload(&file)?;
//! println!("{} rows", table.row_count());
//! ```

mod csv;
mod error;
mod upload;

use tracing::debug;

use intake_model::ParsedTable;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Decoding ===
pub use csv::{decode_csv, decode_text, ensure_shape, read_csv_headers};

// === Upload Gate ===
pub use upload::{
    CSV_MEDIA_TYPE, MAX_UPLOAD_BYTES, SelectedFile, check_file_size, check_file_type,
    check_upload, format_file_size,
};

/// Runs the gate, decoder and shape check for one selected file.
pub fn load_upload(file: &SelectedFile) -> Result<ParsedTable> {
    check_upload(file)?;
    let table = decode_csv(&file.bytes)?;
    ensure_shape(&table)?;
    debug!(
        file_name = %file.name,
        header_count = table.headers.len(),
        row_count = table.row_count(),
        "upload loaded"
    );
    Ok(table)
}
