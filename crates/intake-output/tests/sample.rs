//! Integration tests for the sample CSV.

use intake_ingest::{decode_csv, read_csv_headers};
use intake_model::REQUIRED_FIELDS;
use intake_output::{DirectorySink, SAMPLE_FILE_NAME, generate_sample_csv, write_sample};

#[test]
fn sample_decodes_to_registry_headers_and_no_rows() {
    let csv = generate_sample_csv();
    let table = decode_csv(csv.as_bytes()).unwrap();
    assert_eq!(table.headers, REQUIRED_FIELDS.to_vec());
    assert_eq!(table.row_count(), 0);
}

#[test]
fn sample_header_preview_matches_registry() {
    let headers = read_csv_headers(&generate_sample_csv()).unwrap();
    assert_eq!(headers, REQUIRED_FIELDS.to_vec());
}

#[test]
fn write_sample_to_directory() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_sample(&DirectorySink::new(temp.path())).unwrap();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(SAMPLE_FILE_NAME));
    assert_eq!(std::fs::read_to_string(path).unwrap(), generate_sample_csv());
}
