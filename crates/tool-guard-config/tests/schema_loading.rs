// tool-guard-config/tests/schema_loading.rs
// ============================================================================
// Module: Schema Loading Tests
// Description: Parsing and validation tests for schema documents.
// Purpose: Ensure schema documents load strictly, preserve declaration
//          order, and ignore unknown fields.
// Dependencies: tool-guard-config, tool-guard-core, tempfile
// ============================================================================
//! ## Overview
//! Validates the documented YAML shape, declaration-order preservation,
//! unknown-field tolerance, and fail-closed handling of malformed entries.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Write;

use tool_guard_config::ConfigError;
use tool_guard_config::load_schema_file;
use tool_guard_config::parse_schema_document;
use tool_guard_core::ParameterKind;

// ============================================================================
// SECTION: Documented Shape
// ============================================================================

/// Verifies the documented example parses with every constraint.
#[test]
fn schema_documented_example() {
    let schemas = parse_schema_document(
        r#"
schemas:
  - name: weather
    parameters:
      location: { type: string, required: true, max_length: 100, pattern: "[A-Za-z ,]+" }
      unit:     { type: string, required: false, enum: ["C", "F"] }
"#,
    )
    .unwrap();

    assert_eq!(schemas.len(), 1);
    let weather = &schemas[0];
    assert_eq!(weather.name.as_str(), "weather");
    assert_eq!(weather.parameters.len(), 2);

    let location = weather.parameter("location").unwrap();
    assert_eq!(location.kind, ParameterKind::String);
    assert!(location.required);
    assert_eq!(location.max_length, Some(100));
    assert_eq!(location.pattern.as_ref().unwrap().source(), "[A-Za-z ,]+");

    let unit = weather.parameter("unit").unwrap();
    assert!(!unit.required);
    assert_eq!(unit.allowed_values, vec!["C".to_string(), "F".to_string()]);
}

/// Verifies parameter declaration order survives loading.
#[test]
fn schema_preserves_declaration_order() {
    let schemas = parse_schema_document(
        r"
schemas:
  - name: ordered
    parameters:
      zeta: { type: string, required: true }
      alpha: { type: number, required: true }
      mike: { type: boolean, required: false }
",
    )
    .unwrap();

    let names: Vec<&str> =
        schemas[0].parameters.iter().map(|parameter| parameter.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mike"]);
}

/// Verifies unknown fields are ignored.
#[test]
fn schema_ignores_unknown_fields() {
    let schemas = parse_schema_document(
        r"
schemas:
  - name: weather
    description: forecast lookup
    parameters:
      location: { type: string, required: true, deprecated: true }
",
    )
    .unwrap();
    assert_eq!(schemas[0].parameters.len(), 1);
}

/// Verifies an empty document yields no schemas.
#[test]
fn schema_empty_document() {
    assert!(parse_schema_document("schemas: []").unwrap().is_empty());
}

// ============================================================================
// SECTION: Fail-Closed Parsing
// ============================================================================

/// Verifies unknown kinds are rejected.
#[test]
fn schema_rejects_unknown_kind() {
    let error = parse_schema_document(
        r"
schemas:
  - name: weather
    parameters:
      location: { type: text, required: true }
",
    )
    .unwrap_err();
    assert!(matches!(error, ConfigError::Invalid(_)), "got {error:?}");
    assert!(error.to_string().contains("location"), "message: {error}");
}

/// Verifies invalid patterns are rejected at load time.
#[test]
fn schema_rejects_invalid_pattern() {
    let error = parse_schema_document(
        r#"
schemas:
  - name: weather
    parameters:
      location: { type: string, required: true, pattern: "([unclosed" }
"#,
    )
    .unwrap_err();
    assert!(error.to_string().contains("invalid pattern"), "message: {error}");
}

/// Verifies entries without a name are rejected.
#[test]
fn schema_rejects_missing_name() {
    let error = parse_schema_document(
        r"
schemas:
  - name: ''
    parameters: {}
",
    )
    .unwrap_err();
    assert!(error.to_string().contains("requires a name"), "message: {error}");
}

/// Verifies malformed YAML surfaces a parse failure.
#[test]
fn schema_rejects_malformed_yaml() {
    let error = parse_schema_document("schemas: [unclosed").unwrap_err();
    assert!(matches!(error, ConfigError::Yaml { .. }), "got {error:?}");
}

// ============================================================================
// SECTION: File Loading
// ============================================================================

/// Verifies loading from a file and the missing-file failure.
#[test]
fn schema_file_loading() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r"
schemas:
  - name: search
    parameters:
      query: {{ type: string, required: true }}
"
    )
    .unwrap();

    let schemas = load_schema_file(file.path()).unwrap();
    assert_eq!(schemas[0].name.as_str(), "search");

    let error = load_schema_file(std::path::Path::new("/nonexistent/schemas.yaml")).unwrap_err();
    assert!(matches!(error, ConfigError::Io { .. }), "got {error:?}");
}
