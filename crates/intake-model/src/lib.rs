//! Core types shared by the lead intake crates.
//!
//! - [`REQUIRED_FIELDS`] / [`RequiredFields`]: the fixed header registry
//! - [`ParsedTable`] / [`CsvRow`]: a decoded CSV upload
//! - [`ValidationOutcome`] / [`SubmissionOutcome`]: per-action results

pub mod fields;
pub mod outcome;
pub mod table;

pub use fields::{REQUIRED_FIELDS, RequiredFields};
pub use outcome::{SubmissionOutcome, ValidationOutcome};
pub use table::{CsvRow, ParsedTable};
