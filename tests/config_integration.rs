//! Integration tests for edit plan loading and validation

use slang::config::{
    load_from_path, load_from_str, load_json_from_str, ConfigError, EditPlan, ValidationIssue,
};
use slang::Edit;
use std::fs;
use tempfile::TempDir;

const PLAN: &str = r#"
[meta]
name = "greeting"
description = "Rewrite the greeting"

[[edits]]
op = "replace"
range = { start = 0, end = 5 }
text = "Bye"

[[edits]]
op = "insert"
at = 17
text = " Maria"

[[edits]]
op = "remove"
range = { start = 11, end = 17 }
"#;

#[test]
fn test_load_plan_basic() {
    let plan = load_from_str(PLAN).unwrap();

    assert_eq!(plan.meta.name, "greeting");
    assert_eq!(plan.meta.description.as_deref(), Some("Rewrite the greeting"));
    assert!(!plan.meta.allow_overlap);
    assert_eq!(
        plan.edits,
        vec![
            Edit::replace(0..5, "Bye"),
            Edit::insert(17, " Maria"),
            Edit::remove(11..17),
        ]
    );
}

#[test]
fn test_plan_applies_in_any_order() {
    let plan = load_from_str(PLAN).unwrap();
    assert_eq!(plan.apply_to("Hello Alice Brown").unwrap(), "Bye Alice Maria");
}

#[test]
fn test_load_json_plan() {
    let json = r#"{
        "meta": { "name": "json" },
        "edits": [{ "op": "insert", "at": 0, "text": "// header\n" }]
    }"#;
    let plan = load_json_from_str(json).unwrap();

    assert_eq!(plan.meta.name, "json");
    assert_eq!(plan.apply_to("fn main() {}").unwrap(), "// header\nfn main() {}");
}

#[test]
fn test_plan_round_trips_through_json() {
    let plan = load_from_str(PLAN).unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    assert_eq!(load_json_from_str(&json).unwrap(), plan);
}

#[test]
fn test_validation_empty_edits() {
    let result = load_from_str("[meta]\nname = \"empty\"\n");
    match result {
        Err(ConfigError::Validation { source, .. }) => {
            assert_eq!(source.issues, vec![ValidationIssue::EmptyEditList]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_validation_inverted_range() {
    let toml = r#"
[[edits]]
op = "remove"
range = { start = 9, end = 4 }
"#;
    match load_from_str(toml) {
        Err(ConfigError::Validation { source, .. }) => {
            assert_eq!(
                source.issues,
                vec![ValidationIssue::InvertedRange {
                    index: 0,
                    start: 9,
                    end: 4
                }]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_validation_overlap() {
    let toml = r#"
[[edits]]
op = "remove"
range = { start = 0, end = 10 }

[[edits]]
op = "insert"
at = 4
text = "x"
"#;
    match load_from_str(toml) {
        Err(ConfigError::Validation { source, .. }) => {
            assert_eq!(
                source.issues,
                vec![ValidationIssue::Overlapping { first: 0, second: 1 }]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_allow_overlap_skips_disjointness() {
    let toml = r#"
[meta]
allow_overlap = true

[[edits]]
op = "remove"
range = { start = 0, end = 3 }

[[edits]]
op = "insert"
at = 0
text = "x"
"#;
    let plan = load_from_str(toml).unwrap();
    assert!(plan.meta.allow_overlap);
    assert_eq!(plan.apply_to("abcdef").unwrap(), "xdef");
}

#[test]
fn test_unknown_op_is_parse_error() {
    let toml = r#"
[[edits]]
op = "rewrite"
at = 0
"#;
    let err = load_from_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Toml { path: None, .. }));
    assert!(err.to_string().contains("failed to parse edit plan TOML"));
}

#[test]
fn test_load_from_path_dispatches_on_extension() {
    let dir = TempDir::new().unwrap();
    let toml_path = dir.path().join("plan.toml");
    let json_path = dir.path().join("plan.JSON");
    fs::write(&toml_path, PLAN).unwrap();
    fs::write(
        &json_path,
        serde_json::to_string(&load_from_str(PLAN).unwrap()).unwrap(),
    )
    .unwrap();

    let from_toml: EditPlan = load_from_path(&toml_path).unwrap();
    let from_json: EditPlan = load_from_path(&json_path).unwrap();
    assert_eq!(from_toml, from_json);
}

#[test]
fn test_errors_carry_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[edits]]\nop = ").unwrap();

    let err = load_from_path(&path).unwrap_err();
    match &err {
        ConfigError::Toml { path: Some(p), .. } => assert_eq!(p, &path),
        other => panic!("expected TOML error with path, got {other:?}"),
    }
    assert!(err.to_string().contains("broken.toml"));

    let missing = load_from_path(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io { .. }));
    assert!(std::error::Error::source(&missing).is_some());
}
