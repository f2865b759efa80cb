// tool-guard-core/src/runtime/env.rs
// ============================================================================
// Module: Evaluation Environment Builder
// Description: Assembles the expression environment from a tool call.
// Purpose: Surface request-derived fields under fixed roots with zero-valued
//          defaults.
// Dependencies: crate::core, cond-expr, serde_json
// ============================================================================

//! ## Overview
//! Conditions read a fixed environment: `user`, `session`, `params`, `tool`,
//! `time`, `request`, and `metadata`. Requests may omit context entirely;
//! the builder supplies zero-valued substructures so expressions referencing
//! unused fields never fail. The schema is the compile-time allow-list; the
//! environment is the per-call value tree.

use cond_expr::Env;
use cond_expr::EnvSchema;
use serde_json::Value;
use serde_json::json;

use crate::core::call::CallContext;
use crate::core::call::ToolCall;

// ============================================================================
// SECTION: Environment Schema
// ============================================================================

/// Returns the identifier allow-list for guard conditions.
///
/// Fixed roots admit exactly the listed fields; `params` and `metadata` are
/// open, admitting any key the request carries.
#[must_use]
pub fn guard_env_schema() -> EnvSchema {
    EnvSchema::new()
        .with_fixed_root("user", ["id", "role", "permissions"])
        .with_fixed_root("session", ["id", "conversation_id", "previous_calls"])
        .with_fixed_root("tool", ["name"])
        .with_fixed_root("time", ["hour"])
        .with_fixed_root("request", ["ip"])
        .with_open_root("params")
        .with_open_root("metadata")
}

// ============================================================================
// SECTION: Environment Builder
// ============================================================================

/// Builds the evaluation environment for one tool call.
#[must_use]
pub fn build_env(call: &ToolCall) -> Env {
    let empty = CallContext::default();
    let context = call.context.as_ref().unwrap_or(&empty);

    let mut env = Env::new();
    env.set_root(
        "user",
        json!({
            "id": context.user_id.as_deref().unwrap_or(""),
            "role": context.user_role.as_deref().unwrap_or(""),
            "permissions": context.user_permissions,
        }),
    );
    env.set_root(
        "session",
        json!({
            "id": context.session_id.as_deref().unwrap_or(""),
            "conversation_id": context.conversation_id.as_deref().unwrap_or(""),
            "previous_calls": context.previous_calls,
        }),
    );
    env.set_root("params", Value::Object(call.parameters.clone()));
    env.set_root("tool", json!({ "name": call.name.as_str() }));
    env.set_root("time", json!({ "hour": context.time_of_day.unwrap_or(0) }));
    env.set_root("request", json!({ "ip": context.ip_address.as_deref().unwrap_or("") }));
    env.set_root("metadata", Value::Object(context.metadata.clone()));
    env
}
