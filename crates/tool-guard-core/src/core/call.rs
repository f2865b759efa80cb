// tool-guard-core/src/core/call.rs
// ============================================================================
// Module: Tool Call Model
// Description: Tool-invocation requests and their calling context.
// Purpose: Provide strongly typed, serializable request structures.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ToolCall`] is one structured request to invoke a named tool with an
//! argument mapping. Context is optional; every context field has a zero
//! value so conditional policies can reference it without presence checks.
//! Tool calls live for exactly one validation and are never stored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Tool name referenced by calls, schemas, and policies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolName(String);

impl ToolName {
    /// Creates a new tool name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ToolName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ToolName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Opaque identifier for one tool call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolCallId(String);

impl ToolCallId {
    /// Creates a new tool call identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolCallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ToolCallId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ToolCallId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Time
// ============================================================================

/// Unix-epoch millisecond timestamp.
///
/// # Invariants
/// - Values are supplied by callers (the façade stamps on entry); the core
///   never reads wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }
}

// ============================================================================
// SECTION: Call Context
// ============================================================================

/// Context accompanying a tool call for conditional policy evaluation.
///
/// # Invariants
/// - Every field is optional; absent fields surface as zero values in the
///   policy evaluation environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallContext {
    /// Stable user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Role of the calling user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
    /// Session identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Conversation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Tool names already invoked in this session, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_calls: Vec<String>,
    /// Permissions held by the calling user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_permissions: Vec<String>,
    /// Caller IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Hour of day, 0-23.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<u8>,
    /// Arbitrary context data surfaced under `metadata.*`.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

// ============================================================================
// SECTION: Tool Call
// ============================================================================

/// A structured request to invoke a named tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call identifier; assigned by the façade when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ToolCallId>,
    /// Tool name to invoke.
    pub name: ToolName,
    /// Argument mapping.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Optional calling context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<CallContext>,
    /// Entry timestamp; set by the façade when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl ToolCall {
    /// Creates a call with a name and parameters, leaving the rest unset.
    #[must_use]
    pub fn new(name: impl Into<ToolName>, parameters: Map<String, Value>) -> Self {
        Self {
            id: None,
            name: name.into(),
            parameters,
            context: None,
            timestamp: None,
        }
    }

    /// Returns a copy of this call under a different tool name.
    ///
    /// Used for fuzzy candidates and rewrite corrections: identifier,
    /// parameters, context, and timestamp are preserved.
    #[must_use]
    pub fn renamed(&self, name: impl Into<ToolName>) -> Self {
        Self {
            id: self.id.clone(),
            name: name.into(),
            parameters: self.parameters.clone(),
            context: self.context.clone(),
            timestamp: self.timestamp,
        }
    }
}
