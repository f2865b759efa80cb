// tool-guard-core/src/runtime/validator.rs
// ============================================================================
// Module: Validator
// Description: Top-level decision assembly for tool calls.
// Purpose: Merge schema resolution, fuzzy suggestion, parameter validation,
//          and policy evaluation into a single validation outcome.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The validator never fails on malformed input: every path yields a
//! [`ValidationResult`]. Confidence values are contractual because
//! downstream code may threshold on them: 1.0 for definitive decisions,
//! 0.95 for policy-backed fuzzy rewrites, 0.9 for fuzzy suggestions the
//! caller must confirm.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::call::ToolCall;
use crate::core::call::ToolName;
use crate::core::policy::PolicyAction;
use crate::core::result::PolicyActionLabel;
use crate::core::result::ValidationResult;
use crate::core::result::ValidationStatus;
use crate::interfaces::CancelToken;
use crate::interfaces::ValidateError;
use crate::runtime::engine::PolicyEngine;
use crate::runtime::engine::PolicyOutcome;
use crate::runtime::fuzzy::suggest_tool_name;
use crate::runtime::params::validate_parameters;
use crate::runtime::policy_registry::PolicyRegistry;
use crate::runtime::schema_registry::SchemaRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum edit distance for near-miss tool-name suggestions.
const FUZZY_DISTANCE_BOUND: usize = 2;

/// Confidence for definitive decisions.
const CONFIDENCE_DEFINITIVE: f64 = 1.0;

/// Confidence for fuzzy-driven rewrites backed by a REWRITE policy.
const CONFIDENCE_FUZZY_REWRITE: f64 = 0.95;

/// Confidence for fuzzy suggestions the caller must confirm.
const CONFIDENCE_FUZZY_SUGGEST: f64 = 0.9;

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Top-level validation orchestrator.
#[derive(Default)]
pub struct Validator {
    /// Conditional policy engine with its program cache.
    engine: PolicyEngine,
}

impl Validator {
    /// Creates a validator around the given policy engine.
    #[must_use]
    pub const fn new(engine: PolicyEngine) -> Self {
        Self {
            engine,
        }
    }

    /// Returns the policy engine, for cache maintenance.
    #[must_use]
    pub const fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    /// Validates one tool call against the registered schemas and policies.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::Cancelled`] when the token is cancelled;
    /// malformed input never errors.
    pub fn validate(
        &self,
        schemas: &SchemaRegistry,
        policies: &PolicyRegistry,
        call: &ToolCall,
        cancel: &CancelToken,
    ) -> Result<ValidationResult, ValidateError> {
        let Some(schema) = schemas.lookup(&call.name) else {
            return self.resolve_unknown_tool(schemas, policies, call, cancel);
        };

        if let Err(violation) = validate_parameters(schema, &call.parameters) {
            return Ok(rejected(
                call,
                CONFIDENCE_DEFINITIVE,
                format!("Parameter validation failed: {violation}"),
            ));
        }

        let outcome = self.engine.evaluate(policies, call, cancel)?;
        Ok(apply_outcome(call, outcome))
    }

    /// Handles calls whose tool name has no registered schema.
    fn resolve_unknown_tool(
        &self,
        schemas: &SchemaRegistry,
        policies: &PolicyRegistry,
        call: &ToolCall,
        cancel: &CancelToken,
    ) -> Result<ValidationResult, ValidateError> {
        let suggestion =
            suggest_tool_name(call.name.as_str(), schemas.all_names(), FUZZY_DISTANCE_BOUND);
        let Some(suggestion) = suggestion else {
            return Ok(rejected(call, CONFIDENCE_DEFINITIVE, "Unknown tool name".to_string()));
        };

        // Probe the policies registered under the name as written: an
        // explicit REWRITE policy on the near-miss turns it into an allowed
        // correction under the fuzzy suggestion.
        let outcome = self.engine.evaluate(policies, call, cancel)?;
        let candidate = call.renamed(suggestion.name.clone());

        if let PolicyAction::Rewrite {
            ..
        } = outcome.action
        {
            return Ok(ValidationResult {
                tool_call_id: call.id.clone(),
                status: ValidationStatus::Rewritten,
                confidence: CONFIDENCE_FUZZY_REWRITE,
                reason: Some(format!("Tool name rewritten to '{}' by policy", suggestion.name)),
                policy_action: PolicyActionLabel::Rewritten,
                execution_allowed: true,
                suggested_correction: Some(candidate),
                modifications: Some(name_modification(&suggestion.name)),
            });
        }

        Ok(ValidationResult {
            tool_call_id: call.id.clone(),
            status: ValidationStatus::Rejected,
            confidence: CONFIDENCE_FUZZY_SUGGEST,
            reason: Some(format!("Unknown tool name. Did you mean '{}'?", suggestion.name)),
            policy_action: PolicyActionLabel::Rejected,
            execution_allowed: false,
            suggested_correction: Some(candidate),
            modifications: None,
        })
    }
}

// ============================================================================
// SECTION: Outcome Mapping
// ============================================================================

/// Maps a policy outcome onto the final result for a known tool.
fn apply_outcome(call: &ToolCall, outcome: PolicyOutcome) -> ValidationResult {
    match outcome.action {
        PolicyAction::Allow => approved(call, outcome.reason, PolicyActionLabel::Approved),
        PolicyAction::Log => approved(call, outcome.reason, PolicyActionLabel::Logged),
        PolicyAction::RateLimit => {
            approved(call, outcome.reason, PolicyActionLabel::RateLimited)
        }
        PolicyAction::Reject | PolicyAction::ContextReject => {
            rejected(call, CONFIDENCE_DEFINITIVE, outcome.reason)
        }
        PolicyAction::Rewrite {
            target,
        } => {
            let target = target.unwrap_or_else(|| call.name.clone());
            ValidationResult {
                tool_call_id: call.id.clone(),
                status: ValidationStatus::Rewritten,
                confidence: CONFIDENCE_DEFINITIVE,
                reason: Some(outcome.reason),
                policy_action: PolicyActionLabel::Rewritten,
                execution_allowed: true,
                suggested_correction: Some(call.renamed(target.clone())),
                modifications: Some(name_modification(&target)),
            }
        }
    }
}

/// Builds an approved result.
fn approved(call: &ToolCall, reason: String, label: PolicyActionLabel) -> ValidationResult {
    ValidationResult {
        tool_call_id: call.id.clone(),
        status: ValidationStatus::Approved,
        confidence: CONFIDENCE_DEFINITIVE,
        reason: Some(reason),
        policy_action: label,
        execution_allowed: true,
        suggested_correction: None,
        modifications: None,
    }
}

/// Builds a rejected result.
fn rejected(call: &ToolCall, confidence: f64, reason: String) -> ValidationResult {
    ValidationResult {
        tool_call_id: call.id.clone(),
        status: ValidationStatus::Rejected,
        confidence,
        reason: Some(reason),
        policy_action: PolicyActionLabel::Rejected,
        execution_allowed: false,
        suggested_correction: None,
        modifications: None,
    }
}

/// Builds the `{"name": <target>}` modification map.
fn name_modification(target: &ToolName) -> Map<String, Value> {
    let mut modifications = Map::new();
    modifications.insert("name".to_string(), Value::String(target.as_str().to_string()));
    modifications
}
