// tool-guard-core/src/core/policy.rs
// ============================================================================
// Module: Policy Model
// Description: Conditional guardrail policies for tool calls.
// Purpose: Provide the tagged action sum and policy record the engine
//          evaluates.
// Dependencies: crate::core::call
// ============================================================================

//! ## Overview
//! A [`Policy`] decides the fate of tool calls for one tool (or for every
//! tool via the `"*"` wildcard). Policies carry an optional condition in the
//! expression language; an absent or empty condition always matches. Higher
//! priority wins; insertion order breaks ties.

use crate::core::call::ToolName;

// ============================================================================
// SECTION: Policy Action
// ============================================================================

/// Wildcard tool name matching every tool after specific policies.
pub const WILDCARD_TOOL: &str = "*";

/// Action taken when a policy matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyAction {
    /// Allow and approve the call.
    Allow,
    /// Deny the call.
    Reject,
    /// Deny the call; context-driven variant with identical outward effect
    /// to [`PolicyAction::Reject`].
    ContextReject,
    /// Allow the call and label the decision as logged.
    Log,
    /// Advisory only: the core allows; enforcement is the caller's
    /// responsibility.
    RateLimit,
    /// Allow the call under a replacement tool name.
    Rewrite {
        /// Replacement tool; the original name is kept when absent.
        target: Option<ToolName>,
    },
}

impl PolicyAction {
    /// Returns the stable configuration label for the action.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Reject => "REJECT",
            Self::ContextReject => "CONTEXT_REJECT",
            Self::Log => "LOG",
            Self::RateLimit => "RATE_LIMIT",
            Self::Rewrite {
                ..
            } => "REWRITE",
        }
    }

    /// Returns true when the action denies execution.
    #[must_use]
    pub const fn denies(&self) -> bool {
        matches!(self, Self::Reject | Self::ContextReject)
    }
}

// ============================================================================
// SECTION: Policy Record
// ============================================================================

/// A guardrail policy for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Tool this policy targets, or [`WILDCARD_TOOL`].
    pub tool_name: String,
    /// Action applied on match.
    pub action: PolicyAction,
    /// Conditional expression; absent or empty always matches.
    pub condition: Option<String>,
    /// Human-readable justification surfaced in decisions.
    pub reason: Option<String>,
    /// Priority; higher wins, ties break by insertion order.
    pub priority: i64,
}

impl Policy {
    /// Creates an unconditional policy with default priority.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, action: PolicyAction) -> Self {
        Self {
            tool_name: tool_name.into(),
            action,
            condition: None,
            reason: None,
            priority: 0,
        }
    }

    /// Returns true when this policy applies to every tool.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.tool_name == WILDCARD_TOOL
    }

    /// Returns the stable policy identifier, `<tool>:<TYPE>`.
    #[must_use]
    pub fn policy_id(&self) -> String {
        format!("{}:{}", self.tool_name, self.action.label())
    }
}
