//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by resource config diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Invariants: Tests avoid payload leakage; assertions target category/hint text only.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_eof_errors() {
    let syntax_err = serde_json::from_str::<Value>(r#"{"current_host":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = serde_json::from_str::<Value>(r#"{"current_host": "algo-1""#).unwrap_err();
    assert_eq!(parse::categorize_error(&eof_err), ParseFailureCategory::Eof);
}

#[test]
fn category_mapping_handles_shape_errors() {
    let data_err = serde_json::from_str::<std::collections::BTreeMap<String, Value>>(
        r#"["algo-1", "algo-2"]"#,
    )
    .unwrap_err();
    assert_eq!(parse::categorize_error(&data_err), ParseFailureCategory::Data);
}

#[test]
fn hint_contains_category_and_context() {
    let err = serde_json::from_str::<Value>("{\"current_host\": tru}").unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: syntax"));
    assert!(hint.contains("context: test.context"));
    assert!(!hint.contains("tru"));
}

#[test]
fn labels_are_stable() {
    let cases = [
        (ParseFailureCategory::Syntax, "syntax"),
        (ParseFailureCategory::Eof, "truncated"),
        (ParseFailureCategory::Data, "shape"),
        (ParseFailureCategory::Io, "io"),
    ];
    for (category, label) in cases {
        assert_eq!(category.label(), label);
    }
}
