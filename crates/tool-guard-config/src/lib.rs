// tool-guard-config/src/lib.rs
// ============================================================================
// Module: Tool Guard Config Library
// Description: Canonical YAML document model for schemas and policies.
// Purpose: Single source of truth for schemas.yaml and policies.yaml
//          semantics.
// Dependencies: tool-guard-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! `tool-guard-config` defines the YAML documents the guard loads:
//! `{schemas: [...]}` and `{policies: [...]}`. Parsing is strict and
//! fail-closed where it matters (unknown kinds, invalid patterns), while
//! unknown fields are ignored for forward compatibility. The crate also
//! renders registered entries back to canonical YAML so that load, export,
//! and re-load yield identical registry contents.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod policy;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ConfigError;
pub use policy::PolicyDocument;
pub use policy::PolicyEntry;
pub use policy::PolicyKind;
pub use policy::load_policy_file;
pub use policy::parse_policy_document;
pub use policy::policy_document_yaml;
pub use schema::ParameterEntry;
pub use schema::SchemaDocument;
pub use schema::SchemaEntry;
pub use schema::load_schema_file;
pub use schema::parse_schema_document;
pub use schema::schema_document_yaml;
