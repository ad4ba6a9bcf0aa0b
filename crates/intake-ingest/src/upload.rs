//! Upload gate: file type and size checks that run before any parsing.

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Declared media type that is accepted regardless of file name.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// A file the user picked, as handed over by whatever surface selected it.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// File name including extension.
    pub name: String,
    /// Media type declared by the selecting surface, if any.
    pub declared_type: Option<String>,
    /// Raw content.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, declared_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type,
            bytes,
        }
    }

    /// Reads a file from disk after checking its type and size.
    ///
    /// The size comes from file metadata so oversized files are rejected
    /// without being read.
    pub fn from_path(path: &Path, declared_type: Option<String>) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        check_file_type(&name, declared_type.as_deref())?;

        let metadata = std::fs::metadata(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        check_file_size(metadata.len())?;

        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(file_name = %name, size = bytes.len(), "read upload");
        Ok(Self::new(name, declared_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Checks type, size and emptiness, in that order.
pub fn check_upload(file: &SelectedFile) -> Result<()> {
    check_file_type(&file.name, file.declared_type.as_deref())?;
    check_file_size(file.size())?;
    if file.bytes.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    Ok(())
}

/// Accepts `*.csv` names or a declared `text/csv` type.
pub fn check_file_type(name: &str, declared_type: Option<&str>) -> Result<()> {
    if name.ends_with(".csv") || declared_type == Some(CSV_MEDIA_TYPE) {
        Ok(())
    } else {
        Err(IngestError::InvalidFileType {
            name: name.to_string(),
        })
    }
}

pub fn check_file_size(size: u64) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(IngestError::FileTooLarge {
            size,
            max_size: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Human-readable size: bytes, then KB and MB with two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}
