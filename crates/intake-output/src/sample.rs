//! Header-only sample CSV.

use tracing::info;

use intake_model::REQUIRED_FIELDS;

use crate::error::Result;
use crate::sink::DownloadSink;

/// File name offered for the sample download.
pub const SAMPLE_FILE_NAME: &str = "sample.csv";

/// The required fields joined by commas, followed by one newline.
///
/// No data rows and no quoting: none of the registry entries contain a
/// comma, quote or line break.
pub fn generate_sample_csv() -> String {
    let mut csv = REQUIRED_FIELDS.join(",");
    csv.push('\n');
    csv
}

/// Generates the sample and hands it to `sink` as [`SAMPLE_FILE_NAME`].
pub fn write_sample<S: DownloadSink + ?Sized>(sink: &S) -> Result<S::Receipt> {
    let csv = generate_sample_csv();
    let receipt = sink.deliver(SAMPLE_FILE_NAME, csv.as_bytes())?;
    info!(file_name = SAMPLE_FILE_NAME, bytes = csv.len(), "sample written");
    Ok(receipt)
}
