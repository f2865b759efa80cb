// tool-guard-config/src/policy.rs
// ============================================================================
// Module: Policy Documents
// Description: YAML model and conversions for guardrail policies.
// Purpose: Parse policies.yaml into core policies and render them back to
//          canonical YAML.
// Dependencies: tool-guard-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! Policy documents have the shape `{policies: [{tool_name, type,
//! condition?, reason?, priority?, target?}]}`. The `type` field maps onto
//! the core's tagged action sum; `target` only carries meaning for REWRITE
//! entries and is dropped otherwise. Condition strings are carried verbatim:
//! the engine compiles them lazily and fail-closed-skips rules whose
//! conditions are broken.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tool_guard_core::Policy;
use tool_guard_core::PolicyAction;
use tool_guard_core::ToolName;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Document Model
// ============================================================================

/// Top-level policy document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Declared policies, in document order.
    #[serde(default)]
    pub policies: Vec<PolicyEntry>,
}

/// Policy type labels as written in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyKind {
    /// Allow and approve.
    Allow,
    /// Deny; final.
    Reject,
    /// Allow under a replacement tool name.
    Rewrite,
    /// Allow; label the decision as logged.
    Log,
    /// Deny; identical outward effect to REJECT.
    ContextReject,
    /// Advisory; the core allows, enforcement is external.
    RateLimit,
}

/// One policy as written in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// Tool this policy targets, or `"*"`.
    pub tool_name: String,
    /// Policy action label.
    #[serde(rename = "type")]
    pub kind: PolicyKind,
    /// Conditional expression; absent or empty always matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Human-readable justification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Priority; higher wins.
    #[serde(default, skip_serializing_if = "priority_is_default")]
    pub priority: i64,
    /// Replacement tool for REWRITE entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// True for the default priority, elided in canonical output.
#[allow(clippy::trivially_copy_pass_by_ref, reason = "serde skip_serializing_if signature")]
const fn priority_is_default(priority: &i64) -> bool {
    *priority == 0
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Loads and parses a policy file.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or the document is
/// invalid.
pub fn load_policy_file(path: &Path) -> Result<Vec<Policy>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
        path: path.display().to_string(),
        detail: error.to_string(),
    })?;
    parse_policy_document(&content)
}

/// Parses a policy document into core policies.
///
/// # Errors
///
/// Returns [`ConfigError`] on malformed YAML, empty tool names, or unknown
/// type labels.
pub fn parse_policy_document(content: &str) -> Result<Vec<Policy>, ConfigError> {
    let document: PolicyDocument =
        serde_yaml::from_str(content).map_err(|error| ConfigError::Yaml {
            detail: error.to_string(),
        })?;

    let mut policies = Vec::with_capacity(document.policies.len());
    for (index, entry) in document.policies.iter().enumerate() {
        if entry.tool_name.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "policies[{index}]: tool_name must not be empty"
            )));
        }
        policies.push(policy_from_entry(entry));
    }
    Ok(policies)
}

/// Converts one document entry into a core policy.
fn policy_from_entry(entry: &PolicyEntry) -> Policy {
    let action = match entry.kind {
        PolicyKind::Allow => PolicyAction::Allow,
        PolicyKind::Reject => PolicyAction::Reject,
        PolicyKind::ContextReject => PolicyAction::ContextReject,
        PolicyKind::Log => PolicyAction::Log,
        PolicyKind::RateLimit => PolicyAction::RateLimit,
        PolicyKind::Rewrite => PolicyAction::Rewrite {
            target: entry
                .target
                .as_deref()
                .filter(|target| !target.is_empty())
                .map(ToolName::new),
        },
    };

    Policy {
        tool_name: entry.tool_name.clone(),
        action,
        condition: entry.condition.clone(),
        reason: entry.reason.clone(),
        priority: entry.priority,
    }
}

// ============================================================================
// SECTION: Canonical Export
// ============================================================================

/// Renders registered policies as a canonical YAML document.
///
/// Loading the output again yields the same policies.
///
/// # Errors
///
/// Returns [`ConfigError::Yaml`] when serialization fails.
pub fn policy_document_yaml<'a>(
    policies: impl Iterator<Item = &'a Policy>,
) -> Result<String, ConfigError> {
    let document = PolicyDocument {
        policies: policies.map(entry_from_policy).collect(),
    };
    serde_yaml::to_string(&document).map_err(|error| ConfigError::Yaml {
        detail: error.to_string(),
    })
}

/// Converts a core policy back into its document entry.
fn entry_from_policy(policy: &Policy) -> PolicyEntry {
    let (kind, target) = match &policy.action {
        PolicyAction::Allow => (PolicyKind::Allow, None),
        PolicyAction::Reject => (PolicyKind::Reject, None),
        PolicyAction::ContextReject => (PolicyKind::ContextReject, None),
        PolicyAction::Log => (PolicyKind::Log, None),
        PolicyAction::RateLimit => (PolicyKind::RateLimit, None),
        PolicyAction::Rewrite {
            target,
        } => {
            (PolicyKind::Rewrite, target.as_ref().map(|target| target.as_str().to_string()))
        }
    };

    PolicyEntry {
        tool_name: policy.tool_name.clone(),
        kind,
        condition: policy.condition.clone(),
        reason: policy.reason.clone(),
        priority: policy.priority,
        target,
    }
}
