//! Required header validation.
//!
//! A header row passes when every entry of [`REQUIRED_FIELDS`] appears in it
//! verbatim. Comparison is exact: no case folding, no trimming, no synonyms.
//! Missing fields are reported in registry order.

use std::collections::HashSet;

use tracing::debug;

use intake_model::{ParsedTable, REQUIRED_FIELDS, RequiredFields, ValidationOutcome};

/// Checks `headers` against the required field registry.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> ValidationOutcome {
    let present: HashSet<&str> = headers.iter().map(AsRef::as_ref).collect();
    let missing_fields: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !present.contains(**field))
        .map(|field| (*field).to_string())
        .collect();
    let extra_count = present
        .iter()
        .filter(|header| !RequiredFields.contains(header))
        .count();
    debug!(
        header_count = headers.len(),
        missing_count = missing_fields.len(),
        extra_count,
        "validated headers"
    );
    ValidationOutcome {
        is_valid: missing_fields.is_empty(),
        missing_fields,
        headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
    }
}

/// Checks the header row of a decoded table.
pub fn validate_table(table: &ParsedTable) -> ValidationOutcome {
    validate_headers(&table.headers)
}

/// One-line description of an outcome.
pub fn summary_message(outcome: &ValidationOutcome) -> String {
    if outcome.is_valid {
        return "All required fields are present.".to_string();
    }
    let noun = if outcome.missing_count() == 1 {
        "field"
    } else {
        "fields"
    };
    format!(
        "Missing {} required {noun}: {}",
        outcome.missing_count(),
        outcome.missing_fields.join(", ")
    )
}
