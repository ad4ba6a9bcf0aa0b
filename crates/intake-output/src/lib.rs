//! Output generation for lead intake.
//!
//! - [`generate_sample_csv`]: header-only template built from the registry
//! - [`DownloadSink`]: "save these bytes as a named file" capability

mod error;
mod sample;
mod sink;

pub use error::{OutputError, Result};
pub use sample::{SAMPLE_FILE_NAME, generate_sample_csv, write_sample};
pub use sink::{DirectorySink, DownloadSink, StdoutSink};
