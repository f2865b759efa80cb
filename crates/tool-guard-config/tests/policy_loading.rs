// tool-guard-config/tests/policy_loading.rs
// ============================================================================
// Module: Policy Loading Tests
// Description: Parsing and validation tests for policy documents.
// Purpose: Ensure policy documents load strictly and map onto the core
//          action sum.
// Dependencies: tool-guard-config, tool-guard-core, tempfile
// ============================================================================
//! ## Overview
//! Validates type-label mapping, defaults, REWRITE targets, and fail-closed
//! handling of malformed entries.

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
use tool_guard_config::load_policy_file;
use tool_guard_config::parse_policy_document;
use tool_guard_core::PolicyAction;
use tool_guard_core::ToolName;

// ============================================================================
// SECTION: Documented Shape
// ============================================================================

/// Verifies the documented example parses with conditions and priorities.
#[test]
fn policy_documented_example() {
    let policies = parse_policy_document(
        r#"
policies:
  - tool_name: admin_tool
    type: REJECT
    condition: "user.role != 'admin'"
    reason: "Only administrators can use this tool"
    priority: 10
  - tool_name: "*"
    type: REJECT
    reason: "Unknown tool"
    priority: 1
"#,
    )
    .unwrap();

    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0].tool_name, "admin_tool");
    assert_eq!(policies[0].action, PolicyAction::Reject);
    assert_eq!(policies[0].condition.as_deref(), Some("user.role != 'admin'"));
    assert_eq!(policies[0].priority, 10);
    assert!(policies[1].is_wildcard());
}

/// Verifies every type label maps onto the action sum.
#[test]
fn policy_maps_every_kind() {
    let policies = parse_policy_document(
        r"
policies:
  - { tool_name: a, type: ALLOW }
  - { tool_name: b, type: REJECT }
  - { tool_name: c, type: CONTEXT_REJECT }
  - { tool_name: d, type: LOG }
  - { tool_name: e, type: RATE_LIMIT }
  - { tool_name: f, type: REWRITE, target: g }
",
    )
    .unwrap();

    assert_eq!(policies[0].action, PolicyAction::Allow);
    assert_eq!(policies[1].action, PolicyAction::Reject);
    assert_eq!(policies[2].action, PolicyAction::ContextReject);
    assert_eq!(policies[3].action, PolicyAction::Log);
    assert_eq!(policies[4].action, PolicyAction::RateLimit);
    assert_eq!(
        policies[5].action,
        PolicyAction::Rewrite {
            target: Some(ToolName::new("g"))
        }
    );
}

/// Verifies defaults: no condition, no reason, priority zero.
#[test]
fn policy_defaults() {
    let policies = parse_policy_document(
        r"
policies:
  - tool_name: weather
    type: ALLOW
",
    )
    .unwrap();
    let policy = &policies[0];
    assert_eq!(policy.condition, None);
    assert_eq!(policy.reason, None);
    assert_eq!(policy.priority, 0);
}

/// Verifies REWRITE without a target keeps the slot empty.
#[test]
fn policy_rewrite_without_target() {
    let policies = parse_policy_document(
        r"
policies:
  - tool_name: old_tool
    type: REWRITE
",
    )
    .unwrap();
    assert_eq!(
        policies[0].action,
        PolicyAction::Rewrite {
            target: None
        }
    );
}

/// Verifies `target` is dropped for non-rewrite kinds.
#[test]
fn policy_target_ignored_outside_rewrite() {
    let policies = parse_policy_document(
        r"
policies:
  - tool_name: a
    type: ALLOW
    target: ignored
",
    )
    .unwrap();
    assert_eq!(policies[0].action, PolicyAction::Allow);
}

// ============================================================================
// SECTION: Fail-Closed Parsing
// ============================================================================

/// Verifies unknown type labels are rejected.
#[test]
fn policy_rejects_unknown_kind() {
    let error = parse_policy_document(
        r"
policies:
  - tool_name: a
    type: MAYBE
",
    )
    .unwrap_err();
    assert!(matches!(error, ConfigError::Yaml { .. }), "got {error:?}");
}

/// Verifies empty tool names are rejected with their index.
#[test]
fn policy_rejects_empty_tool_name() {
    let error = parse_policy_document(
        r"
policies:
  - tool_name: a
    type: ALLOW
  - tool_name: ''
    type: ALLOW
",
    )
    .unwrap_err();
    assert!(error.to_string().contains("policies[1]"), "message: {error}");
}

// ============================================================================
// SECTION: File Loading
// ============================================================================

/// Verifies loading from a file and the missing-file failure.
#[test]
fn policy_file_loading() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r"
policies:
  - tool_name: weather
    type: ALLOW
"
    )
    .unwrap();

    let policies = load_policy_file(file.path()).unwrap();
    assert_eq!(policies.len(), 1);

    let error = load_policy_file(std::path::Path::new("/nonexistent/policies.yaml")).unwrap_err();
    assert!(matches!(error, ConfigError::Io { .. }), "got {error:?}");
}
