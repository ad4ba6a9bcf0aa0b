//! Property and integration tests for header validation.

use std::collections::HashSet;

use intake_ingest::decode_csv;
use intake_model::REQUIRED_FIELDS;
use intake_validate::{summary_message, validate_headers, validate_table};
use proptest::prelude::*;

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(REQUIRED_FIELDS.to_vec()).prop_map(str::to_string),
        proptest::sample::select(REQUIRED_FIELDS.to_vec()).prop_map(|f| f.to_uppercase()),
        "[a-z _]{0,16}",
    ]
}

proptest! {
    #[test]
    fn valid_iff_registry_is_subset(headers in proptest::collection::vec(header_strategy(), 0..32)) {
        let outcome = validate_headers(&headers);
        let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
        let subset = REQUIRED_FIELDS.iter().all(|field| present.contains(field));
        prop_assert_eq!(outcome.is_valid, subset);
    }

    #[test]
    fn missing_fields_follow_registry_order(headers in proptest::collection::vec(header_strategy(), 0..32)) {
        let outcome = validate_headers(&headers);
        let expected: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !headers.iter().any(|h| h == **field))
            .map(|field| field.to_string())
            .collect();
        prop_assert_eq!(&outcome.missing_fields, &expected);

        let unique: HashSet<&String> = outcome.missing_fields.iter().collect();
        prop_assert_eq!(unique.len(), outcome.missing_fields.len());
        prop_assert_eq!(&outcome.headers, &headers);
    }
}

#[test]
fn decoded_table_with_missing_columns() {
    let table = decode_csv(b"email,first name,last name\na@x.io,Ada,Lovelace\n").unwrap();
    let outcome = validate_table(&table);
    assert!(!outcome.is_valid);
    assert_eq!(outcome.missing_count(), 11);
    assert_eq!(outcome.missing_fields[0], "account_linkedin_url");
    assert!(!outcome.missing_fields.contains(&"email".to_string()));
}

#[test]
fn summary_lists_missing_fields() {
    let mut headers: Vec<&str> = REQUIRED_FIELDS.to_vec();
    headers.retain(|h| *h != "region" && *h != "email");
    let outcome = validate_headers(&headers);
    insta::assert_snapshot!(
        summary_message(&outcome),
        @"Missing 2 required fields: email, region"
    );
}

#[test]
fn summary_uses_singular_for_one_field() {
    let headers: Vec<&str> = REQUIRED_FIELDS[1..].to_vec();
    let outcome = validate_headers(&headers);
    insta::assert_snapshot!(
        summary_message(&outcome),
        @"Missing 1 required field: account_linkedin_url"
    );
}
