// tool-guard-core/src/core/mod.rs
// ============================================================================
// Module: Tool Guard Core Types
// Description: Canonical tool-call, schema, policy, and result structures.
// Purpose: Provide stable, serializable types for validation requests and
//          decisions.
// Dependencies: serde, regex
// ============================================================================

//! ## Overview
//! Core types define tool calls, their calling context, tool schemas with
//! per-parameter constraints, conditional policies, and validation results.
//! These types are the canonical source of truth for any derived API
//! surfaces (HTTP, SDKs).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod call;
pub mod policy;
pub mod result;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use call::CallContext;
pub use call::Timestamp;
pub use call::ToolCall;
pub use call::ToolCallId;
pub use call::ToolName;
pub use policy::Policy;
pub use policy::PolicyAction;
pub use policy::WILDCARD_TOOL;
pub use result::PolicyActionLabel;
pub use result::ValidationResult;
pub use result::ValidationStatus;
pub use schema::ParameterKind;
pub use schema::ParameterPattern;
pub use schema::ParameterSpec;
pub use schema::SchemaError;
pub use schema::ToolSchema;
