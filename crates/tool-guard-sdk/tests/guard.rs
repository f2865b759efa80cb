// tool-guard-sdk/tests/guard.rs
// ============================================================================
// Module: Guard Façade Tests
// Description: End-to-end validation scenarios through the SDK surface.
// Purpose: Ensure the façade wires loaders, registries, and the validator
//          together per contract.
// Dependencies: tool-guard-sdk, tool-guard-core, tempfile, serde_json
// ============================================================================
//! ## Overview
//! Drives the guard through YAML fixtures: the documented end-to-end
//! scenarios, identity synthesis, reload idempotence, loader replacement,
//! canonical export, and degraded states with partial configuration.

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
use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tempfile::NamedTempFile;
use tool_guard_config::ConfigError;
use tool_guard_core::CallContext;
use tool_guard_core::CancelToken;
use tool_guard_core::Policy;
use tool_guard_core::PolicyAction;
use tool_guard_core::PolicyActionLabel;
use tool_guard_core::ToolCall;
use tool_guard_core::ToolCallId;
use tool_guard_core::ToolSchema;
use tool_guard_core::ValidationStatus;
use tool_guard_sdk::Guard;
use tool_guard_sdk::GuardError;
use tool_guard_sdk::PolicyLoader;
use tool_guard_sdk::SchemaLoader;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const SCHEMAS_YAML: &str = r#"
schemas:
  - name: weather
    parameters:
      location: { type: string, required: true, max_length: 100 }
      unit:     { type: string, required: false, enum: ["C", "F"] }
  - name: transfer_money
    parameters:
      amount: { type: number, required: true }
  - name: admin_tool
    parameters:
      action: { type: string, required: true }
"#;

const POLICIES_YAML: &str = r#"
policies:
  - tool_name: weather
    type: ALLOW
  - tool_name: admin_tool
    type: REJECT
    condition: "user.role != 'admin'"
    reason: "Only administrators can use this tool"
    priority: 10
  - tool_name: admin_tool
    type: ALLOW
    condition: "user.role == 'admin'"
    reason: "Admin access granted"
    priority: 20
  - tool_name: transfer_money
    type: REJECT
    condition: "params.amount > 1000"
    reason: "Amount too high"
    priority: 15
  - tool_name: wheather
    type: REWRITE
    target: weather
    reason: "Auto-corrected typo"
"#;

fn write_fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Guard loaded with the standard fixtures.
fn loaded_guard() -> Guard {
    let guard = Guard::new();
    let cancel = CancelToken::new();
    let schemas = write_fixture(SCHEMAS_YAML);
    let policies = write_fixture(POLICIES_YAML);
    guard.load_schemas(schemas.path(), &cancel).unwrap();
    guard.load_policies(policies.path(), &cancel).unwrap();
    guard
}

fn params(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries.iter().map(|(key, value)| ((*key).to_string(), value.clone())).collect()
}

fn role_call(name: &str, parameters: Map<String, Value>, role: &str) -> ToolCall {
    let mut call = ToolCall::new(name, parameters);
    call.context = Some(CallContext {
        user_role: Some(role.to_string()),
        ..CallContext::default()
    });
    call
}

// ============================================================================
// SECTION: End-to-End Scenarios
// ============================================================================

/// Scenario: a conforming weather call under an ALLOW policy approves.
#[test]
fn guard_approves_weather_call() {
    let guard = loaded_guard();
    let call = ToolCall::new("weather", params(&[("location", json!("London")), ("unit", json!("C"))]));

    let result = guard.validate_tool_call(call, &CancelToken::new()).unwrap();
    assert_eq!(result.status, ValidationStatus::Approved);
    assert!(result.execution_allowed);
    assert!((result.confidence - 1.0).abs() < f64::EPSILON);
}

/// Scenario: role-based REJECT and ALLOW on the same tool.
#[test]
fn guard_role_based_decisions() {
    let guard = loaded_guard();
    let cancel = CancelToken::new();

    let denied = guard
        .validate_tool_call(role_call("admin_tool", params(&[("action", json!("x"))]), "user"), &cancel)
        .unwrap();
    assert_eq!(denied.status, ValidationStatus::Rejected);
    assert!(!denied.execution_allowed);
    assert_eq!(denied.reason.as_deref(), Some("Only administrators can use this tool"));

    let granted = guard
        .validate_tool_call(role_call("admin_tool", params(&[("action", json!("x"))]), "admin"), &cancel)
        .unwrap();
    assert_eq!(granted.status, ValidationStatus::Approved);
    assert_eq!(granted.reason.as_deref(), Some("Admin access granted"));
}

/// Scenario: parameter-based threshold on transfer amounts.
#[test]
fn guard_amount_threshold() {
    let guard = loaded_guard();
    let cancel = CancelToken::new();

    let high = guard
        .validate_tool_call(
            ToolCall::new("transfer_money", params(&[("amount", json!(5000))])),
            &cancel,
        )
        .unwrap();
    assert_eq!(high.status, ValidationStatus::Rejected);

    let low = guard
        .validate_tool_call(
            ToolCall::new("transfer_money", params(&[("amount", json!(500))])),
            &cancel,
        )
        .unwrap();
    assert_eq!(low.status, ValidationStatus::Approved);
}

/// Scenario: near-miss name with a REWRITE policy is corrected at 0.95.
#[test]
fn guard_fuzzy_rewrite() {
    let guard = loaded_guard();
    let call = ToolCall::new("wheather", params(&[("location", json!("Paris"))]));

    let result = guard.validate_tool_call(call, &CancelToken::new()).unwrap();
    assert_eq!(result.status, ValidationStatus::Rewritten);
    assert!(result.execution_allowed);
    assert!((result.confidence - 0.95).abs() < f64::EPSILON);

    let correction = result.suggested_correction.unwrap();
    assert_eq!(correction.name.as_str(), "weather");
    assert_eq!(correction.parameters.get("location"), Some(&json!("Paris")));
    assert_eq!(result.modifications.unwrap().get("name"), Some(&json!("weather")));
}

/// Scenario: near-miss name without a rewrite policy rejects at 0.9 with a
/// suggestion.
#[test]
fn guard_fuzzy_suggestion() {
    let guard = loaded_guard();
    let call = ToolCall::new("wether", params(&[("location", json!("Paris"))]));

    let result = guard.validate_tool_call(call, &CancelToken::new()).unwrap();
    assert_eq!(result.status, ValidationStatus::Rejected);
    assert!(!result.execution_allowed);
    assert!((result.confidence - 0.9).abs() < f64::EPSILON);
    assert_eq!(result.reason.as_deref(), Some("Unknown tool name. Did you mean 'weather'?"));
    assert!(result.suggested_correction.is_some());
}

/// Scenario: a name far from every registered tool rejects definitively.
#[test]
fn guard_unknown_tool() {
    let guard = loaded_guard();
    let call = ToolCall::new("summon_demons", Map::new());

    let result = guard.validate_tool_call(call, &CancelToken::new()).unwrap();
    assert_eq!(result.status, ValidationStatus::Rejected);
    assert!((result.confidence - 1.0).abs() < f64::EPSILON);
    assert_eq!(result.reason.as_deref(), Some("Unknown tool name"));
    assert!(result.suggested_correction.is_none());
}

// ============================================================================
// SECTION: Identity Synthesis
// ============================================================================

/// Verifies missing ids and timestamps are synthesized, and given ids kept.
#[test]
fn guard_synthesizes_identity() {
    let guard = loaded_guard();
    let cancel = CancelToken::new();

    let result = guard
        .validate_tool_call(
            ToolCall::new("weather", params(&[("location", json!("Rome"))])),
            &cancel,
        )
        .unwrap();
    let id = result.tool_call_id.unwrap();
    assert!(id.as_str().starts_with("call_"), "id was {id}");

    let second = guard
        .validate_tool_call(
            ToolCall::new("weather", params(&[("location", json!("Rome"))])),
            &cancel,
        )
        .unwrap();
    assert_ne!(Some(id), second.tool_call_id);

    let mut call = ToolCall::new("weather", params(&[("location", json!("Rome"))]));
    call.id = Some(ToolCallId::new("supplied"));
    let result = guard.validate_tool_call(call, &cancel).unwrap();
    assert_eq!(result.tool_call_id, Some(ToolCallId::new("supplied")));
}

// ============================================================================
// SECTION: Degraded States
// ============================================================================

/// Verifies validation before any load rejects as unknown.
#[test]
fn guard_empty_rejects_unknown() {
    let guard = Guard::new();
    let result = guard
        .validate_tool_call(ToolCall::new("weather", Map::new()), &CancelToken::new())
        .unwrap();
    assert_eq!(result.status, ValidationStatus::Rejected);
    assert_eq!(result.reason.as_deref(), Some("Unknown tool name"));
}

/// Verifies schemas without policies fall through to the default allow.
#[test]
fn guard_schemas_only_default_allows() {
    let guard = Guard::new();
    let schemas = write_fixture(SCHEMAS_YAML);
    guard.load_schemas(schemas.path(), &CancelToken::new()).unwrap();

    let result = guard
        .validate_tool_call(
            ToolCall::new("weather", params(&[("location", json!("Rome"))])),
            &CancelToken::new(),
        )
        .unwrap();
    assert_eq!(result.status, ValidationStatus::Approved);
    assert_eq!(result.policy_action, PolicyActionLabel::Approved);
}

/// Verifies loader failures surface as config errors.
#[test]
fn guard_load_failures() {
    let guard = Guard::new();
    let cancel = CancelToken::new();

    let missing = guard.load_schemas(Path::new("/nonexistent/schemas.yaml"), &cancel);
    assert!(matches!(missing, Err(GuardError::Config(ConfigError::Io { .. }))));

    let malformed = write_fixture("policies: [nope");
    let result = guard.load_policies(malformed.path(), &cancel);
    assert!(matches!(result, Err(GuardError::Config(ConfigError::Yaml { .. }))));
}

/// Verifies cancellation aborts operations with a transient error.
#[test]
fn guard_cancellation() {
    let guard = loaded_guard();
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = guard.validate_tool_call(ToolCall::new("weather", Map::new()), &cancel);
    assert!(matches!(result, Err(GuardError::Cancelled)));
}

// ============================================================================
// SECTION: Reload Idempotence and Export
// ============================================================================

/// Verifies reloading the policy file does not accumulate policies.
#[test]
fn guard_policy_reload_is_idempotent() {
    let guard = loaded_guard();
    let cancel = CancelToken::new();

    let replacement = write_fixture(
        r"
policies:
  - tool_name: weather
    type: REJECT
    reason: weather disabled
",
    );
    guard.load_policies(replacement.path(), &cancel).unwrap();
    guard.load_policies(replacement.path(), &cancel).unwrap();

    // The original admin_tool policies are gone; only the new rule fires.
    let result = guard
        .validate_tool_call(
            ToolCall::new("weather", params(&[("location", json!("Rome"))])),
            &cancel,
        )
        .unwrap();
    assert_eq!(result.status, ValidationStatus::Rejected);
    assert_eq!(result.reason.as_deref(), Some("weather disabled"));

    let exported = guard.export_policies().unwrap();
    assert_eq!(exported.matches("tool_name").count(), 1, "exported: {exported}");
}

/// Verifies canonical export round-trips through a fresh guard.
#[test]
fn guard_export_roundtrip() {
    let guard = loaded_guard();
    let cancel = CancelToken::new();

    let schemas_yaml = guard.export_schemas().unwrap();
    let policies_yaml = guard.export_policies().unwrap();

    let schemas_file = write_fixture(&schemas_yaml);
    let policies_file = write_fixture(&policies_yaml);
    let clone = Guard::new();
    clone.load_schemas(schemas_file.path(), &cancel).unwrap();
    clone.load_policies(policies_file.path(), &cancel).unwrap();

    let call = ToolCall::new("wheather", params(&[("location", json!("Paris"))]));
    let original = guard.validate_tool_call(call.clone(), &cancel).unwrap();
    let mirrored = clone.validate_tool_call(call, &cancel).unwrap();
    assert_eq!(original.status, mirrored.status);
    assert_eq!(original.reason, mirrored.reason);
    assert_eq!(original.suggested_correction.map(|correction| correction.name),
        mirrored.suggested_correction.map(|correction| correction.name));
}

// ============================================================================
// SECTION: Loader Replacement
// ============================================================================

/// Schema loader serving a fixed in-memory set.
struct StaticSchemas;

impl SchemaLoader for StaticSchemas {
    fn load(&self, _source: &Path) -> Result<Vec<ToolSchema>, ConfigError> {
        Ok(vec![ToolSchema::new("ping", Vec::new())])
    }
}

/// Policy loader serving a fixed in-memory set.
struct StaticPolicies;

impl PolicyLoader for StaticPolicies {
    fn load(&self, _source: &Path) -> Result<Vec<Policy>, ConfigError> {
        Ok(vec![Policy::new("ping", PolicyAction::Log)])
    }
}

/// Verifies caller-provided loaders replace the YAML defaults.
#[test]
fn guard_custom_loaders() {
    let guard =
        Guard::builder().schema_loader(StaticSchemas).policy_loader(StaticPolicies).build();
    let cancel = CancelToken::new();

    guard.load_schemas(&PathBuf::from("ignored"), &cancel).unwrap();
    guard.load_policies(&PathBuf::from("ignored"), &cancel).unwrap();

    let result = guard.validate_tool_call(ToolCall::new("ping", Map::new()), &cancel).unwrap();
    assert_eq!(result.status, ValidationStatus::Approved);
    assert_eq!(result.policy_action, PolicyActionLabel::Logged);
}
