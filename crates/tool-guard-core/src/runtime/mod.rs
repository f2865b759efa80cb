// tool-guard-core/src/runtime/mod.rs
// ============================================================================
// Module: Tool Guard Runtime
// Description: Registries, matching, policy evaluation, and decision
//              assembly.
// Purpose: Execute the validation pipeline over read-only registered state.
// Dependencies: crate::{core, interfaces}, cond-expr
// ============================================================================

//! ## Overview
//! The runtime is CPU-bound and performs no I/O: schema lookup, a bounded
//! edit-distance scan, expression evaluation, and result construction.
//! Registries are read-only during validation; loaders mutate them only
//! behind the façade's writer lock.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod env;
pub mod fuzzy;
pub mod params;
pub mod policy_registry;
pub mod schema_registry;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::PolicyEngine;
pub use engine::PolicyOutcome;
pub use env::build_env;
pub use env::guard_env_schema;
pub use fuzzy::FuzzySuggestion;
pub use fuzzy::levenshtein;
pub use fuzzy::suggest_tool_name;
pub use params::ParameterViolation;
pub use params::validate_parameters;
pub use policy_registry::PolicyRegistry;
pub use schema_registry::SchemaRegistry;
pub use validator::Validator;
