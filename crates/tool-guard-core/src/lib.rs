// tool-guard-core/src/lib.rs
// ============================================================================
// Module: Tool Guard Core Library
// Description: Public API surface for the tool-guard core.
// Purpose: Expose the data model, interfaces, and validation runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Tool Guard core validates structured tool-invocation requests emitted by
//! an LLM agent before they are dispatched: schema lookup with fuzzy
//! near-miss resolution, parameter validation, and a prioritized
//! conditional-policy engine merged into a single decision. The core
//! performs no I/O on the validation path and integrates through explicit
//! interfaces rather than embedding into agent frameworks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interfaces::CancelToken;
pub use interfaces::GuardLogger;
pub use interfaces::LogLevel;
pub use interfaces::NoopLogger;
pub use interfaces::ValidateError;
pub use runtime::FuzzySuggestion;
pub use runtime::ParameterViolation;
pub use runtime::PolicyEngine;
pub use runtime::PolicyOutcome;
pub use runtime::PolicyRegistry;
pub use runtime::SchemaRegistry;
pub use runtime::Validator;
pub use runtime::build_env;
pub use runtime::fuzzy::suggest_tool_name;
pub use runtime::guard_env_schema;
pub use runtime::params::validate_parameters;
