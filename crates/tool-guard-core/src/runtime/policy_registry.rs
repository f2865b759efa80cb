// tool-guard-core/src/runtime/policy_registry.rs
// ============================================================================
// Module: Policy Registry
// Description: Ordered policy lists keyed by tool name.
// Purpose: Maintain priority-descending, insertion-stable policy ordering
//          with wildcard fallback retrieval.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Policies for a tool are kept sorted by priority descending; the sort is
//! stable, so equal priorities preserve insertion order. Retrieval for a
//! tool concatenates its specific policies with the `"*"` wildcard list and
//! re-sorts, so wildcards with a high priority can still outrank specific
//! rules while equal priorities keep specific rules first. `clear_all`
//! makes configuration reloads idempotent.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::core::policy::Policy;
use crate::core::policy::WILDCARD_TOOL;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of guardrail policies keyed by tool name.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    /// Tool name to priority-ordered policies.
    policies: BTreeMap<String, Vec<Policy>>,
}

impl PolicyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a policy under its tool name.
    ///
    /// The per-tool list stays sorted by priority descending; the stable
    /// sort preserves insertion order on ties.
    pub fn register(&mut self, policy: Policy) {
        let list = self.policies.entry(policy.tool_name.clone()).or_default();
        list.push(policy);
        list.sort_by_key(|policy| Reverse(policy.priority));
    }

    /// Returns the policies applicable to a tool, specific rules first, then
    /// wildcards, re-sorted by priority descending.
    #[must_use]
    pub fn policies_for(&self, tool_name: &str) -> Vec<&Policy> {
        let mut applicable: Vec<&Policy> = Vec::new();

        if let Some(specific) = self.policies.get(tool_name) {
            applicable.extend(specific.iter());
        }
        if tool_name != WILDCARD_TOOL
            && let Some(wildcard) = self.policies.get(WILDCARD_TOOL)
        {
            applicable.extend(wildcard.iter());
        }

        applicable.sort_by_key(|policy| Reverse(policy.priority));
        applicable
    }

    /// Removes every registered policy.
    pub fn clear_all(&mut self) {
        self.policies.clear();
    }

    /// Returns the total number of registered policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.values().map(Vec::len).sum()
    }

    /// Returns true when no policy is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Returns every registered policy in tool-name order, priority
    /// descending within each tool.
    pub fn all_policies(&self) -> impl Iterator<Item = &Policy> {
        self.policies.values().flatten()
    }
}
