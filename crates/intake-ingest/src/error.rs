//! Error types for upload gating and CSV decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while accepting and decoding an upload.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upload Gate ===
    /// File is neither named `*.csv` nor declared as `text/csv`.
    #[error("invalid file type: {name}")]
    InvalidFileType { name: String },

    /// File exceeds the upload limit.
    #[error("file too large: {size} bytes (maximum {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    /// File has no content at all.
    #[error("file is empty")]
    EmptyFile,

    /// Failed to read the file from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding ===
    /// Content is not decodable text or not tokenizable as CSV.
    #[error("failed to decode CSV: {reason}")]
    Decode { reason: String },

    // === Shape ===
    /// No header row was found.
    #[error("CSV has no headers")]
    NoHeaders,

    /// Header row present but no data rows follow.
    #[error("CSV has no data rows")]
    NoDataRows,
}

impl IngestError {
    /// Short message suitable for showing to the person who picked the file.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidFileType { .. } => "Invalid file type. Please upload a CSV file.",
            Self::FileTooLarge { .. } => {
                "File size exceeds the maximum limit of 10MB. Please upload a smaller file."
            }
            Self::EmptyFile => "The file is empty. Please upload a valid CSV file.",
            Self::FileRead { .. } => "Failed to read file.",
            Self::Decode { .. } => {
                "Failed to process CSV file. Please ensure the file is a valid CSV format."
            }
            Self::NoHeaders => {
                "CSV file appears to be empty or has no headers. Please check your file format."
            }
            Self::NoDataRows => "CSV file has no data rows. Please ensure your file contains data.",
        }
    }

    /// True for failures detected before any parse attempt.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileType { .. }
                | Self::FileTooLarge { .. }
                | Self::EmptyFile
                | Self::FileRead { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
