//! Byte-to-text decoding (UTF-8 only).

use crate::error::{IngestError, Result};

const UTF8_BOM: &str = "\u{feff}";

/// Decodes upload bytes as UTF-8, dropping a leading byte-order mark.
///
/// UTF-16 byte-order marks are rejected rather than guessed at.
pub fn decode_text(bytes: &[u8]) -> Result<&str> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    if bytes.len() >= 2 {
        // UTF-16 LE BOM
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(unsupported("UTF-16 LE"));
        }
        // UTF-16 BE BOM
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(unsupported("UTF-16 BE"));
        }
    }
    let text = std::str::from_utf8(bytes).map_err(|e| IngestError::Decode {
        reason: format!("content is not valid UTF-8: {e}"),
    })?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}

fn unsupported(encoding: &str) -> IngestError {
    IngestError::Decode {
        reason: format!("unsupported encoding {encoding}"),
    }
}
