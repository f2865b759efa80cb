// crates/tool-guard-sdk/examples/context_policies.rs
// ============================================================================
// Module: Context-Aware Policies Example
// Description: End-to-end guard demonstration with conditional policies.
// Purpose: Show role, parameter, time, session, and typo-correction rules
//          deciding real tool calls.
// Dependencies: tool-guard-sdk, tool-guard-core
// ============================================================================

//! ## Overview
//! Writes a schema and policy file, loads them into a guard, and validates a
//! series of tool calls whose context flips each decision. Run with
//! `cargo run --example context_policies`.

use std::fs;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tool_guard_core::CallContext;
use tool_guard_core::CancelToken;
use tool_guard_core::ToolCall;
use tool_guard_sdk::Guard;
use tool_guard_sdk::GuardError;

const SCHEMAS_YAML: &str = r"schemas:
  - name: admin_tool
    parameters:
      action: { type: string, required: true }
  - name: transfer_money
    parameters:
      amount: { type: number, required: true }
      recipient: { type: string, required: true }
  - name: maintenance_tool
    parameters:
      operation: { type: string, required: true }
  - name: sensitive_operation
    parameters:
      data: { type: string, required: false }
  - name: weather
    parameters:
      location: { type: string, required: true }
";

const POLICIES_YAML: &str = r#"policies:
  # Role-based access control
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

  # Parameter-based restrictions
  - tool_name: transfer_money
    type: REJECT
    condition: "params.amount > 1000"
    reason: "Transfer amount too high"
    priority: 15

  # Time-based restrictions
  - tool_name: maintenance_tool
    type: REJECT
    condition: "time.hour < 9 || time.hour > 17"
    reason: "Maintenance tools only available during business hours"
    priority: 5

  # Session-based restrictions
  - tool_name: sensitive_operation
    type: REJECT
    condition: "'sensitive_operation' in session.previous_calls"
    reason: "Operation already performed in this session"
    priority: 8

  # Auto-correct typos
  - tool_name: wheather
    type: REWRITE
    target: weather
    reason: "Auto-corrected typo"

  - tool_name: weather
    type: ALLOW
"#;

fn params(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries.iter().map(|(key, value)| ((*key).to_string(), value.clone())).collect()
}

fn report(label: &str, guard: &Guard, call: ToolCall) -> Result<(), GuardError> {
    let result = guard.validate_tool_call(call, &CancelToken::new())?;
    println!(
        "{label} -> {} (allowed: {}): {}",
        result.status.as_str(),
        result.execution_allowed,
        result.reason.unwrap_or_default()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let dir = tempfile::tempdir()?;
    let schemas_path = dir.path().join("schemas.yaml");
    let policies_path = dir.path().join("policies.yaml");
    fs::write(&schemas_path, SCHEMAS_YAML)?;
    fs::write(&policies_path, POLICIES_YAML)?;

    let guard = Guard::new();
    let cancel = CancelToken::new();
    guard.load_schemas(&schemas_path, &cancel)?;
    guard.load_policies(&policies_path, &cancel)?;

    println!("=== Role-based access control ===");
    let mut call = ToolCall::new("admin_tool", params(&[("action", json!("delete_user"))]));
    call.context = Some(CallContext {
        user_id: Some("admin123".to_string()),
        user_role: Some("admin".to_string()),
        ..CallContext::default()
    });
    report("admin user", &guard, call.clone())?;

    if let Some(context) = call.context.as_mut() {
        context.user_role = Some("user".to_string());
    }
    report("regular user", &guard, call)?;

    println!("\n=== Parameter-based restrictions ===");
    let mut transfer = ToolCall::new(
        "transfer_money",
        params(&[("amount", json!(500)), ("recipient", json!("john@example.com"))]),
    );
    report("transfer $500", &guard, transfer.clone())?;

    transfer.parameters.insert("amount".to_string(), json!(5000));
    report("transfer $5000", &guard, transfer)?;

    println!("\n=== Time-based restrictions ===");
    let mut maintenance =
        ToolCall::new("maintenance_tool", params(&[("operation", json!("restart_server"))]));
    maintenance.context = Some(CallContext {
        time_of_day: Some(14),
        ..CallContext::default()
    });
    report("maintenance at 2 PM", &guard, maintenance.clone())?;

    if let Some(context) = maintenance.context.as_mut() {
        context.time_of_day = Some(20);
    }
    report("maintenance at 8 PM", &guard, maintenance)?;

    println!("\n=== Session-based restrictions ===");
    let mut sensitive =
        ToolCall::new("sensitive_operation", params(&[("data", json!("secret_info"))]));
    sensitive.context = Some(CallContext {
        session_id: Some("session123".to_string()),
        previous_calls: vec!["login".to_string(), "get_balance".to_string()],
        ..CallContext::default()
    });
    report("first sensitive call", &guard, sensitive.clone())?;

    if let Some(context) = sensitive.context.as_mut() {
        context.previous_calls.push("sensitive_operation".to_string());
    }
    report("repeated sensitive call", &guard, sensitive)?;

    println!("\n=== Typo correction ===");
    let typo = ToolCall::new("wheather", params(&[("location", json!("Paris"))]));
    let result = guard.validate_tool_call(typo, &cancel)?;
    println!(
        "wheather -> {} (confidence {}), corrected to: {}",
        result.status.as_str(),
        result.confidence,
        result
            .suggested_correction
            .map(|correction| correction.name.as_str().to_string())
            .unwrap_or_default()
    );

    Ok(())
}
