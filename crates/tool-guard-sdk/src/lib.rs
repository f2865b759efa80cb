// tool-guard-sdk/src/lib.rs
// ============================================================================
// Module: Tool Guard SDK Library
// Description: The embeddable Guard façade over the validation core.
// Purpose: Single external entry point: load configuration, validate tool
//          calls, safe for concurrent use.
// Dependencies: tool-guard-core, tool-guard-config, tracing
// ============================================================================

//! ## Overview
//! A [`Guard`] wraps the schema and policy registries behind one
//! reader/writer lock: validation takes the read lock, configuration
//! loading takes the write lock. Missing call identifiers and timestamps
//! are synthesized on entry; everything else is delegated to the core
//! validator.
//!
//! ```no_run
//! use tool_guard_core::CancelToken;
//! use tool_guard_core::ToolCall;
//! use tool_guard_sdk::Guard;
//!
//! # fn main() -> Result<(), tool_guard_sdk::GuardError> {
//! let guard = Guard::new();
//! let cancel = CancelToken::new();
//! guard.load_schemas("schemas.yaml".as_ref(), &cancel)?;
//! guard.load_policies("policies.yaml".as_ref(), &cancel)?;
//!
//! let call = ToolCall::new("weather", serde_json::Map::new());
//! let result = guard.validate_tool_call(call, &cancel)?;
//! if result.execution_allowed {
//!     // dispatch the tool
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod guard;
pub mod loader;
pub mod logging;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use guard::Guard;
pub use guard::GuardBuilder;
pub use guard::GuardError;
pub use loader::PolicyLoader;
pub use loader::SchemaLoader;
pub use loader::YamlPolicyLoader;
pub use loader::YamlSchemaLoader;
pub use logging::TracingLogger;
