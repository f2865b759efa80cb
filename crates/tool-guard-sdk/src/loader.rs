// tool-guard-sdk/src/loader.rs
// ============================================================================
// Module: Configuration Loader Contracts
// Description: Pluggable schema and policy loading.
// Purpose: Let embedders replace the YAML loaders while keeping the guard's
//          locking and registration behavior.
// Dependencies: tool-guard-core, tool-guard-config
// ============================================================================

//! ## Overview
//! Loaders turn a source path into parsed core entries; the guard owns
//! registration and locking. The default implementations read the YAML
//! documents defined by `tool-guard-config`. Custom implementations can pull
//! configuration from anywhere that can produce the same entries.

use std::path::Path;

use tool_guard_config::ConfigError;
use tool_guard_config::load_policy_file;
use tool_guard_config::load_schema_file;
use tool_guard_core::Policy;
use tool_guard_core::ToolSchema;

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// Source of tool schemas.
pub trait SchemaLoader: Send + Sync {
    /// Loads every schema from the source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the source is missing or malformed.
    fn load(&self, source: &Path) -> Result<Vec<ToolSchema>, ConfigError>;
}

/// Source of guardrail policies.
pub trait PolicyLoader: Send + Sync {
    /// Loads every policy from the source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the source is missing or malformed.
    fn load(&self, source: &Path) -> Result<Vec<Policy>, ConfigError>;
}

// ============================================================================
// SECTION: Default YAML Loaders
// ============================================================================

/// Default schema loader reading `{schemas: [...]}` YAML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSchemaLoader;

impl SchemaLoader for YamlSchemaLoader {
    fn load(&self, source: &Path) -> Result<Vec<ToolSchema>, ConfigError> {
        load_schema_file(source)
    }
}

/// Default policy loader reading `{policies: [...]}` YAML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlPolicyLoader;

impl PolicyLoader for YamlPolicyLoader {
    fn load(&self, source: &Path) -> Result<Vec<Policy>, ConfigError> {
        load_policy_file(source)
    }
}
