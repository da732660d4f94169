//! Parse Invariant Tests
//!
//! End-to-end properties of the validation engine:
//! - Validity always mirrors the failure list
//! - Condition-less fields are always evaluated for presence
//! - Condition-false fields contribute no value and no failure
//! - Strict mode flags unknown and conditionally-inapplicable keys
//! - Parsing is deterministic and the schema is reusable across parses

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use intake::schema::Schema;
use intake::value::Scalar;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn person_schema() -> Schema {
    Schema::from_value(json!([
        {"label": "name"},
        {
            "label": "marital_status",
            "help": "Your current marital status.",
            "choices": ["single", "separated", "widowed", "divorced", "married"],
        },
        {
            "label": "zip_code",
            "condition": ["==", "marital_status", "single"],
            "matches": "^\\d{5}$",
        },
    ]))
    .unwrap()
}

fn text_input(pairs: &[(&str, &str)]) -> HashMap<String, Scalar> {
    pairs
        .iter()
        .map(|(label, text)| (label.to_string(), Scalar::from(*text)))
        .collect()
}

// =============================================================================
// Validity Mirrors The Failure List
// =============================================================================

/// is_valid is true exactly when the failure list is empty.
#[test]
fn test_is_valid_mirrors_errors() {
    let schema = person_schema();

    let valid = schema.parse(
        &text_input(&[("name", "N"), ("marital_status", "married")]),
        false,
    );
    assert!(valid.is_valid());
    assert!(valid.errors().is_empty());

    let invalid = schema.parse(&HashMap::new(), false);
    assert!(!invalid.is_valid());
    assert!(!invalid.errors().is_empty());
}

// =============================================================================
// Presence And Required Semantics
// =============================================================================

/// A condition-less field is evaluated regardless of other field values.
#[test]
fn test_unconditional_field_always_evaluated() {
    let schema = person_schema();
    let record = schema.parse(&text_input(&[("marital_status", "married")]), false);

    assert!(!record.is_valid());
    assert_eq!(record.errors()[0].to_string(), "name: This field is required.");
}

/// Round trip: a supplied value comes back out under its label.
#[test]
fn test_round_trip() {
    let schema = Schema::from_value(json!([{"label": "name"}])).unwrap();
    let record = schema.parse(&text_input(&[("name", "x")]), false);

    assert!(record.is_valid());
    assert_eq!(record.value("name").unwrap().as_text(), Some("x"));
}

/// Empty text counts as absent: required failure, and lookup afterwards
/// is a not-found error rather than an empty value.
#[test]
fn test_empty_text_is_absent() {
    let schema = Schema::from_value(json!([{"label": "name"}])).unwrap();
    let record = schema.parse(&text_input(&[("name", "")]), false);

    assert!(!record.is_valid());
    assert_eq!(record.errors()[0].to_string(), "name: This field is required.");

    let err = record.value("name").unwrap_err();
    assert_eq!(err.label, "name");
}

// =============================================================================
// Constraint Checks
// =============================================================================

/// A pattern violation produces exactly one failure referencing the pattern.
#[test]
fn test_pattern_violation() {
    let schema =
        Schema::from_value(json!([{"label": "zip_code", "matches": "^\\d{5}$"}])).unwrap();
    let record = schema.parse(&text_input(&[("zip_code", "abc")]), false);

    assert!(!record.is_valid());
    assert_eq!(record.errors().len(), 1);
    assert_eq!(
        record.errors()[0].to_string(),
        "zip_code: Must match the pattern \"^\\d{5}$\"."
    );
}

// =============================================================================
// Conditional Inclusion
// =============================================================================

/// When the condition holds, the conditional field is required like any other.
#[test]
fn test_condition_true_makes_field_required() {
    let schema = person_schema();
    let record = schema.parse(
        &text_input(&[("name", "N"), ("marital_status", "single")]),
        false,
    );

    assert!(!record.is_valid());
    assert_eq!(
        record.errors()[0].to_string(),
        "zip_code: This field is required."
    );
}

/// When the condition fails, the field contributes no value and no failure.
#[test]
fn test_condition_false_skips_field() {
    let schema = person_schema();
    let record = schema.parse(
        &text_input(&[("name", "N"), ("marital_status", "married")]),
        false,
    );

    assert!(record.is_valid());
    assert!(record.value("zip_code").is_err());
}

// =============================================================================
// Strict Mode
// =============================================================================

/// Keys the schema does not declare fail a strict parse and are ignored
/// otherwise.
#[test]
fn test_strict_flags_unknown_keys() {
    let schema = person_schema();
    let raw = text_input(&[
        ("name", "N"),
        ("marital_status", "married"),
        ("random_key", "random"),
    ]);

    let strict = schema.parse(&raw, true);
    assert!(!strict.is_valid());
    assert_eq!(
        strict.errors()[0].to_string(),
        "Labels \"random_key\" not present in schema."
    );

    let lax = schema.parse(&raw, false);
    assert!(lax.is_valid());
}

/// Keys supplied for a field whose condition failed fail a strict parse.
#[test]
fn test_strict_flags_condition_failed_keys() {
    let schema = person_schema();
    let record = schema.parse(
        &text_input(&[
            ("name", "N"),
            ("marital_status", "married"),
            ("zip_code", "10001"),
        ]),
        true,
    );

    assert!(!record.is_valid());
    assert_eq!(
        record.errors()[0].to_string(),
        "Labels \"zip_code\" failed conditions in schema."
    );
}

// =============================================================================
// Timestamp Coercion
// =============================================================================

/// An ISO-like string and the equivalent epoch integer coerce to the same
/// instant; garbage fails with the invalid-date message.
#[test]
fn test_timestamp_equivalence_and_failure() {
    let schema =
        Schema::from_value(json!([{"label": "time", "type": "timestamp"}])).unwrap();
    let expected = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

    let mut from_text = HashMap::new();
    from_text.insert("time".to_string(), Scalar::from("2020-01-01"));
    let record = schema.parse(&from_text, false);
    assert!(record.is_valid());
    assert_eq!(record.value("time").unwrap().as_timestamp(), Some(expected));

    let mut from_epoch = HashMap::new();
    from_epoch.insert("time".to_string(), Scalar::from(1577836800));
    let epoch_record = schema.parse(&from_epoch, false);
    assert!(epoch_record.is_valid());
    assert_eq!(
        epoch_record.value("time").unwrap().as_timestamp(),
        record.value("time").unwrap().as_timestamp()
    );

    let mut garbage = HashMap::new();
    garbage.insert("time".to_string(), Scalar::from("soonish"));
    let failed = schema.parse(&garbage, false);
    assert!(!failed.is_valid());
    assert_eq!(failed.errors()[0].to_string(), "time: Invalid date/time.");
}

// =============================================================================
// Determinism And Reuse
// =============================================================================

/// The same schema value parses the same input the same way every time.
#[test]
fn test_parse_is_deterministic() {
    let schema = person_schema();
    let raw = text_input(&[("marital_status", "single"), ("zip_code", "abc")]);

    for _ in 0..100 {
        let record = schema.parse(&raw, true);
        let rendered: Vec<String> = record.errors().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "name: This field is required.".to_string(),
                "zip_code: Must match the pattern \"^\\d{5}$\".".to_string(),
            ]
        );
    }
}

/// A schema is shareable across threads; concurrent parses do not interfere.
#[test]
fn test_concurrent_parses() {
    let schema = std::sync::Arc::new(person_schema());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || {
                let status = if i % 2 == 0 { "married" } else { "single" };
                let record =
                    schema.parse(&text_input(&[("name", "N"), ("marital_status", status)]), false);
                record.is_valid()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let valid = handle.join().unwrap();
        // Odd workers trip the conditional zip_code requirement
        assert_eq!(valid, i % 2 == 0);
    }
}
