//! Destinations for generated files.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{OutputError, Result};

/// Something that can receive a named file.
pub trait DownloadSink {
    /// What the caller gets back after a delivery.
    type Receipt;

    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<Self::Receipt>;
}

/// Writes files into a directory, creating it when needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    type Receipt = PathBuf;

    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name == ".." {
            return Err(OutputError::InvalidFileName(file_name.to_string()));
        }
        std::fs::create_dir_all(&self.dir).map_err(|source| OutputError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "file delivered");
        Ok(path)
    }
}

/// Writes file content to standard output; the name is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DownloadSink for StdoutSink {
    type Receipt = ();

    fn deliver(&self, _file_name: &str, bytes: &[u8]) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes).map_err(OutputError::Stdout)?;
        stdout.flush().map_err(OutputError::Stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_sink_creates_dir() {
        let temp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(temp.path().join("nested"));
        let path = sink.deliver("a.csv", b"x\n").unwrap();
        assert_eq!(path, temp.path().join("nested").join("a.csv"));
        assert_eq!(std::fs::read(path).unwrap(), b"x\n");
    }

    #[test]
    fn test_directory_sink_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(temp.path());
        sink.deliver("a.csv", b"old").unwrap();
        let path = sink.deliver("a.csv", b"new").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[test]
    fn test_directory_sink_rejects_path_names() {
        let temp = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(temp.path());
        let result = sink.deliver("../a.csv", b"x");
        assert!(matches!(result, Err(OutputError::InvalidFileName(_))));
    }
}
