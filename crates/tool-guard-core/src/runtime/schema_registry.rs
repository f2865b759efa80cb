// tool-guard-core/src/runtime/schema_registry.rs
// ============================================================================
// Module: Schema Registry
// Description: Name-to-schema mapping for registered tools.
// Purpose: Maintain the set of known tools with deterministic enumeration.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The registry maps tool names to immutable schemas. Enumeration order is
//! sorted (BTreeMap), which makes fuzzy tie-breaking reproducible across
//! runs. Registration overwrites: reloading a schema file is
//! last-writer-wins per name.

use std::collections::BTreeMap;

use crate::core::call::ToolName;
use crate::core::schema::ToolSchema;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of known tool schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Tool name to schema, sorted by name.
    schemas: BTreeMap<ToolName, ToolSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema, overwriting any prior entry with the same name.
    pub fn register(&mut self, schema: ToolSchema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// Returns the schema registered under the given name, if any.
    #[must_use]
    pub fn lookup(&self, name: &ToolName) -> Option<&ToolSchema> {
        self.schemas.get(name)
    }

    /// Returns every registered tool name in sorted order.
    pub fn all_names(&self) -> impl Iterator<Item = &ToolName> {
        self.schemas.keys()
    }

    /// Returns every registered schema in name order.
    pub fn all_schemas(&self) -> impl Iterator<Item = &ToolSchema> {
        self.schemas.values()
    }

    /// Returns the number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true when no schema is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
