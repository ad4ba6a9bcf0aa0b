use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write to standard output.
    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    /// File name would escape the target directory.
    #[error("invalid file name: {0}")]
    InvalidFileName(String),
}

pub type Result<T> = std::result::Result<T, OutputError>;
