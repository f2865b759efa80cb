// tool-guard-core/src/runtime/engine.rs
// ============================================================================
// Module: Policy Engine
// Description: Priority-ordered conditional policy evaluation.
// Purpose: Produce the first matching policy's outcome, failing closed on
//          broken conditions.
// Dependencies: crate::{core, interfaces, runtime::env}, cond-expr
// ============================================================================

//! ## Overview
//! The engine walks a tool's policies in priority order and returns the
//! first match. Conditions compile lazily through a shared program cache. A
//! condition that fails to compile or evaluate is reported once at `warn`
//! and its policy is skipped: closed for that rule, open for the next,
//! never a silent allow of a denying rule. With no match the engine returns
//! the default allow.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use cond_expr::CompileError;
use cond_expr::Env;
use cond_expr::EnvSchema;
use cond_expr::EvalError;
use cond_expr::ProgramCache;
use thiserror::Error;

use crate::core::call::ToolCall;
use crate::core::policy::Policy;
use crate::core::policy::PolicyAction;
use crate::interfaces::CancelToken;
use crate::interfaces::GuardLogger;
use crate::interfaces::NoopLogger;
use crate::interfaces::ValidateError;
use crate::runtime::env::build_env;
use crate::runtime::env::guard_env_schema;
use crate::runtime::policy_registry::PolicyRegistry;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Result of evaluating the applicable policies for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    /// Action of the first matching policy, or the default allow.
    pub action: PolicyAction,
    /// Justification: the policy's reason or a synthetic one.
    pub reason: String,
    /// True when a registered policy matched (false for the default).
    pub matched: bool,
    /// Stable identifier, `<tool>:<TYPE>` or `default:allow`.
    pub policy_id: String,
}

impl PolicyOutcome {
    /// Returns the default outcome when no policy matches.
    #[must_use]
    pub fn default_allow() -> Self {
        Self {
            action: PolicyAction::Allow,
            reason: "no matching policies found".to_string(),
            matched: false,
            policy_id: "default:allow".to_string(),
        }
    }
}

/// Condition failure, either at compile or evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ConditionError {
    /// The condition source failed to compile.
    #[error("{0}")]
    Compile(#[from] CompileError),
    /// The compiled condition failed at runtime.
    #[error("{0}")]
    Eval(#[from] EvalError),
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Conditional policy engine with a shared compiled-program cache.
pub struct PolicyEngine {
    /// Compiled condition cache keyed by verbatim source.
    cache: ProgramCache,
    /// Identifier allow-list for condition compilation.
    schema: EnvSchema,
    /// Diagnostic sink; only `warn` is emitted.
    logger: Arc<dyn GuardLogger>,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(Arc::new(NoopLogger))
    }
}

impl PolicyEngine {
    /// Creates an engine reporting condition failures to the given logger.
    #[must_use]
    pub fn new(logger: Arc<dyn GuardLogger>) -> Self {
        Self {
            cache: ProgramCache::new(),
            schema: guard_env_schema(),
            logger,
        }
    }

    /// Evaluates the applicable policies for a call, first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::Cancelled`] when the token is cancelled
    /// between policy evaluations.
    pub fn evaluate(
        &self,
        registry: &PolicyRegistry,
        call: &ToolCall,
        cancel: &CancelToken,
    ) -> Result<PolicyOutcome, ValidateError> {
        let policies = registry.policies_for(call.name.as_str());
        if policies.is_empty() {
            return Ok(PolicyOutcome::default_allow());
        }

        let env = build_env(call);
        for policy in policies {
            if cancel.is_cancelled() {
                return Err(ValidateError::Cancelled);
            }

            let matched = match policy.condition.as_deref() {
                None | Some("") => true,
                Some(condition) => match self.check_condition(condition, &env) {
                    Ok(matched) => matched,
                    Err(error) => {
                        self.logger.warn(&format!(
                            "skipping policy {}: condition failed: {error}",
                            policy.policy_id()
                        ));
                        continue;
                    }
                },
            };

            if matched {
                return Ok(Self::outcome_for(policy, call));
            }
        }

        Ok(PolicyOutcome::default_allow())
    }

    /// Clears the compiled-condition cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Compiles (or fetches) and evaluates one condition.
    fn check_condition(&self, condition: &str, env: &Env) -> Result<bool, ConditionError> {
        let program = self.cache.get_or_compile(condition, &self.schema)?;
        Ok(program.evaluate(env)?)
    }

    /// Builds the outcome for a matching policy.
    fn outcome_for(policy: &Policy, call: &ToolCall) -> PolicyOutcome {
        let reason = policy
            .reason
            .clone()
            .filter(|reason| !reason.is_empty())
            .unwrap_or_else(|| {
                format!("Policy {} matched for tool {}", policy.action.label(), call.name)
            });
        PolicyOutcome {
            action: policy.action.clone(),
            reason,
            matched: true,
            policy_id: policy.policy_id(),
        }
    }
}
