// tool-guard-core/src/core/result.rs
// ============================================================================
// Module: Validation Result Model
// Description: The single decision emitted for each tool call.
// Purpose: Provide the stable result contract consumed by callers and
//          transports.
// Dependencies: serde, serde_json, crate::core::call
// ============================================================================

//! ## Overview
//! Every validation yields exactly one [`ValidationResult`]; the validator
//! never fails on malformed input. `execution_allowed` holds if and only if
//! the status is approved or rewritten, and rewritten results always carry a
//! suggested correction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::call::ToolCall;
use crate::core::call::ToolCallId;

// ============================================================================
// SECTION: Labels
// ============================================================================

/// Final status of a validated tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// The call may execute as submitted.
    Approved,
    /// The call must not execute.
    Rejected,
    /// The call may execute under the suggested correction.
    Rewritten,
}

impl ValidationStatus {
    /// Returns the stable wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Rewritten => "rewritten",
        }
    }

    /// Returns true when the status permits execution.
    #[must_use]
    pub const fn allows_execution(self) -> bool {
        matches!(self, Self::Approved | Self::Rewritten)
    }
}

/// Stable label describing how policy handled the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyActionLabel {
    /// Approved by policy or by the default allow.
    Approved,
    /// Rejected by schema, fuzzy miss, or policy.
    Rejected,
    /// Rewritten to a corrected call.
    Rewritten,
    /// Approved with a logging advisory.
    Logged,
    /// Approved with a rate-limit advisory; enforcement is external.
    RateLimited,
}

impl PolicyActionLabel {
    /// Returns the stable wire label for the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Rewritten => "rewritten",
            Self::Logged => "logged",
            Self::RateLimited => "rate_limited",
        }
    }
}

// ============================================================================
// SECTION: Validation Result
// ============================================================================

/// The decision emitted for one tool call.
///
/// # Invariants
/// - `execution_allowed` is true exactly when `status` is approved or
///   rewritten.
/// - A rewritten status always carries `suggested_correction`.
/// - `confidence` is 1.0 for definitive decisions and 0.9-0.95 for
///   fuzzy-driven decisions; downstream code may threshold on these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Identifier of the validated call, when the request carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<ToolCallId>,
    /// Final status.
    pub status: ValidationStatus,
    /// Decision confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Human-readable justification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Stable policy-handling label.
    pub policy_action: PolicyActionLabel,
    /// Whether the caller may execute the (possibly corrected) call.
    pub execution_allowed: bool,
    /// Corrected call for rewrites and fuzzy suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_correction: Option<ToolCall>,
    /// Fields changed by a rewrite, e.g. `{"name": "<target>"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifications: Option<Map<String, Value>>,
}
